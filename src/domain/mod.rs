// ==========================================
// Domain layer - schema and record types
// ==========================================

pub mod record;
pub mod schema;

pub use record::{CellValue, FileOutcome, LoadContext, RunSummary, TypedRecord};
pub use schema::{mtr_schema, FieldKind, SchemaField, DATE_FORMAT, PROVENANCE_COLUMNS};
