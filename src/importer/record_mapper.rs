// ==========================================
// Schema-driven record mapper
// ==========================================
// Converts header + data rows into TypedRecords. A name→index lookup
// is built once per file from the header row; per-cell coercion then
// works by position. Coercion failures (bad decimal, bad date) skip
// the affected row only.
// ==========================================

use crate::domain::record::{CellValue, LoadContext, TypedRecord};
use crate::domain::schema::{FieldKind, SchemaField, DATE_FORMAT};
use crate::importer::error::{LoadError, LoadResult};
use crate::importer::loader_trait::{MappingOutcome, RecordMapper};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::warn;

pub struct SchemaRecordMapper;

impl RecordMapper for SchemaRecordMapper {
    fn map(
        &self,
        rows: &[Vec<String>],
        schema: &[SchemaField],
        file_name: &str,
        ctx: &LoadContext,
    ) -> MappingOutcome {
        let mut outcome = MappingOutcome::default();

        let Some((header, data_rows)) = rows.split_first() else {
            return outcome;
        };

        // Header name → column index, built once per file. First
        // occurrence wins when a header name repeats.
        let mut column_index: HashMap<&str, usize> = HashMap::new();
        for (idx, name) in header.iter().enumerate() {
            column_index.entry(name.as_str()).or_insert(idx);
        }

        // A source column missing from the header maps every cell of
        // that field to null; surface the mismatch once per file.
        for field in schema {
            if field.kind != FieldKind::ConstantNull
                && !column_index.contains_key(field.source_column)
            {
                warn!(
                    file = %file_name,
                    column = %field.source_column,
                    "source column missing from header, field will be null"
                );
            }
        }

        for (idx, row) in data_rows.iter().enumerate() {
            // Spreadsheet-style numbering: header is row 1
            let row_number = idx + 2;
            match Self::map_row(row, schema, &column_index, row_number) {
                Ok(values) => outcome.records.push(TypedRecord {
                    values,
                    source_file: file_name.to_string(),
                    loaded_at: ctx.started_at,
                    loaded_by: ctx.actor.clone(),
                }),
                Err(e) => outcome.skipped.push(e),
            }
        }

        outcome
    }
}

impl SchemaRecordMapper {
    fn map_row(
        row: &[String],
        schema: &[SchemaField],
        column_index: &HashMap<&str, usize>,
        row_number: usize,
    ) -> LoadResult<Vec<CellValue>> {
        schema
            .iter()
            .map(|field| Self::map_field(row, field, column_index, row_number))
            .collect()
    }

    fn map_field(
        row: &[String],
        field: &SchemaField,
        column_index: &HashMap<&str, usize>,
        row_number: usize,
    ) -> LoadResult<CellValue> {
        // Reserved columns never look at the document
        if field.kind == FieldKind::ConstantNull {
            return Ok(CellValue::Null);
        }

        // Missing column, missing cell and whitespace-only cell all
        // collapse to null, regardless of the field kind
        let raw = column_index
            .get(field.source_column)
            .and_then(|&idx| row.get(idx))
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty());

        let Some(raw) = raw else {
            return Ok(CellValue::Null);
        };

        match field.kind {
            FieldKind::Text => Ok(CellValue::Text(match field.max_length {
                Some(max) => truncate_chars(raw, max),
                None => raw.to_string(),
            })),
            FieldKind::Decimal => {
                let normalized = if field.decimal_comma_fixup {
                    raw.replace(',', ".")
                } else {
                    raw.to_string()
                };
                normalized
                    .parse::<f64>()
                    .map(CellValue::Decimal)
                    .map_err(|_| LoadError::Validation {
                        row: row_number,
                        field: field.target_name.to_string(),
                        message: format!("not a number: {}", raw),
                    })
            }
            FieldKind::Date => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map(CellValue::Date)
                .map_err(|_| LoadError::Validation {
                    row: row_number,
                    field: field.target_name.to_string(),
                    message: format!("expected {}, got: {}", DATE_FORMAT, raw),
                }),
            FieldKind::ConstantNull => Ok(CellValue::Null),
        }
    }
}

/// Truncate to at most `max` characters, dropping the rightmost ones.
/// Char-based: target widths are defined over characters, and the
/// source data is Cyrillic.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
