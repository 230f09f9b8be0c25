// ==========================================
// Загрузчик МТР - core library
// ==========================================
// ODS spreadsheet documents → typed records → relational store, with
// per-file failure isolation and aggregate reporting.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - schema and record types
pub mod domain;

// Importer layer - the ETL core
pub mod importer;

// Configuration layer
pub mod config;

// Database infrastructure (connection bootstrap / unified PRAGMA)
pub mod db;

// Logging
pub mod logging;

// ==========================================
// Core re-exports
// ==========================================

pub use config::{DatabaseSettings, Settings};
pub use domain::{
    mtr_schema, CellValue, FieldKind, FileOutcome, LoadContext, RunSummary, SchemaField,
    TypedRecord,
};
pub use importer::{
    BatchLoader, FileProcessor, LoadError, LoadResult, OdsSheetReader, RecordMapper,
    SchemaRecordMapper, SheetReader, SqliteBatchLoader,
};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Загрузчик данных МТР (ODS)";
