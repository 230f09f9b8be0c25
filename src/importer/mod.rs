// ==========================================
// Importer layer - the ETL core
// ==========================================
// Pipeline: read document → map to typed records → batch insert.
// Per-file isolation throughout: one bad file or row never stops the
// run.
// ==========================================

pub mod batch_loader;
pub mod error;
pub mod file_processor;
pub mod loader_trait;
pub mod record_mapper;
pub mod sheet_reader;

// Core types
pub use error::{LoadError, LoadResult};
pub use file_processor::FileProcessor;

// Stage implementations
pub use batch_loader::SqliteBatchLoader;
pub use record_mapper::SchemaRecordMapper;
pub use sheet_reader::OdsSheetReader;

// Trait interfaces
pub use loader_trait::{BatchLoader, MappingOutcome, RecordMapper, SheetReader};
