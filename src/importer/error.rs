// ==========================================
// Loader error types
// ==========================================
// thiserror derive; fatal vs recoverable split follows the run's
// propagation policy: Config/Connection/InputDirNotFound abort the run,
// Parse is contained to one file, Validation to one row, Insert rolls
// back one file's batch.
// ==========================================

use thiserror::Error;

/// Error taxonomy of the loading pipeline.
#[derive(Error, Debug)]
pub enum LoadError {
    // ===== fatal: before any processing =====
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("input directory not found: {0}")]
    InputDirNotFound(String),

    // ===== per-file: skip file, continue run =====
    #[error("failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    // ===== per-row: skip row, continue file =====
    #[error("row {row}, field {field}: {message}")]
    Validation {
        row: usize,
        field: String,
        message: String,
    },

    // ===== per-file: rollback batch, continue run =====
    #[error("batch insert failed: {0}")]
    Insert(String),

    // ===== generic =====
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LoadError {
    /// Build a Parse error carrying the offending file name.
    pub fn parse(file: impl Into<String>, message: impl ToString) -> Self {
        LoadError::Parse {
            file: file.into(),
            message: message.to_string(),
        }
    }

    /// Fatal errors halt the run; everything else is contained at its
    /// originating boundary.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LoadError::Config(_) | LoadError::Connection(_) | LoadError::InputDirNotFound(_)
        )
    }
}

impl From<rusqlite::Error> for LoadError {
    fn from(err: rusqlite::Error) -> Self {
        LoadError::Insert(err.to_string())
    }
}

/// Result type alias of the loading pipeline.
pub type LoadResult<T> = Result<T, LoadError>;
