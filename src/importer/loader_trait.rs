// ==========================================
// Trait interfaces of the loading pipeline
// ==========================================
// One trait per stage; the FileProcessor composes them as boxed trait
// objects so each stage can be replaced in tests.
// ==========================================

use crate::domain::record::{LoadContext, TypedRecord};
use crate::domain::schema::SchemaField;
use crate::importer::error::{LoadError, LoadResult};
use rusqlite::Connection;
use std::path::Path;

/// Output of the mapping stage: records in original row order, plus
/// the rows skipped with their field-level errors.
#[derive(Debug, Default)]
pub struct MappingOutcome {
    pub records: Vec<TypedRecord>,
    pub skipped: Vec<LoadError>,
}

/// Parses one spreadsheet document into string rows.
///
/// The first returned row is the header; rows with zero non-empty
/// cells are already dropped. An empty Vec means "no data", not a
/// parse failure. On error, no partial data is returned.
pub trait SheetReader {
    fn read(&self, file_path: &Path) -> LoadResult<Vec<Vec<String>>>;
}

/// Converts header + data rows into typed, schema-conformant records.
///
/// Field coercion failures abort the affected row only; the row lands
/// in `skipped` and mapping continues.
pub trait RecordMapper {
    fn map(
        &self,
        rows: &[Vec<String>],
        schema: &[SchemaField],
        file_name: &str,
        ctx: &LoadContext,
    ) -> MappingOutcome;
}

/// Inserts one file's records into the target table inside a single
/// transaction. All-or-nothing: any failure rolls the batch back.
pub trait BatchLoader {
    fn insert(
        &self,
        conn: &mut Connection,
        records: &[TypedRecord],
        table_name: &str,
    ) -> LoadResult<usize>;
}
