// ==========================================
// Typed records and run bookkeeping
// ==========================================
// CellValue/TypedRecord are the output of the mapping stage; a record
// is created once per raw row and not modified afterwards.
// LoadContext carries the invocation context (principal, start time)
// explicitly so tests can inject deterministic values.
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::{ToSqlOutput, Value};
use rusqlite::ToSql;

/// A single mapped cell, aligned with one SchemaField.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Decimal(f64),
    Date(NaiveDate),
    Null,
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl ToSql for CellValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            CellValue::Text(s) => s.to_sql(),
            CellValue::Decimal(v) => v.to_sql(),
            CellValue::Date(d) => d.to_sql(),
            CellValue::Null => Ok(ToSqlOutput::Owned(Value::Null)),
        }
    }
}

/// One schema-conformant record plus its provenance.
///
/// `values` follows the schema's declaration order; provenance fields
/// come from the orchestrator's LoadContext, never from row data.
#[derive(Debug, Clone)]
pub struct TypedRecord {
    pub values: Vec<CellValue>,
    pub source_file: String,
    pub loaded_at: DateTime<Utc>,
    pub loaded_by: String,
}

/// Invocation context of one run: the execution principal and the
/// moment the run started. Captured once at the binary boundary.
#[derive(Debug, Clone)]
pub struct LoadContext {
    pub actor: String,
    pub started_at: DateTime<Utc>,
}

impl LoadContext {
    pub fn new(actor: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            actor: actor.into(),
            started_at,
        }
    }

    /// Capture the OS user and the current time.
    pub fn from_env() -> Self {
        let actor = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());
        Self::new(actor, Utc::now())
    }
}

/// Result of processing one file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub file_name: String,
    /// Data rows read from the document (header excluded)
    pub rows_read: usize,
    pub rows_inserted: usize,
    /// Per-file error, if the file was skipped or its batch rolled back
    pub error: Option<String>,
}

/// Aggregate result of one run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Eligible files found in the input directory
    pub files_found: usize,
    /// Files actually attempted (equals files_found in this design)
    pub files_processed: usize,
    pub total_rows_inserted: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
    /// Files that contributed at least one inserted row.
    pub fn files_contributing(&self) -> usize {
        self.outcomes.iter().filter(|o| o.rows_inserted > 0).count()
    }
}
