// ==========================================
// Run settings
// ==========================================
// TOML key/value file loaded once at startup. A missing file or a
// missing required key is a fatal Config error, raised before any
// file or connection is touched.
// ==========================================

use crate::importer::error::{LoadError, LoadResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings of one run.
///
/// ```toml
/// input_dir = "data/ods"
///
/// [database]
/// path = "mtr.sqlite"
/// table_name = "перенос_мтр"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Directory scanned for .ods documents
    pub input_dir: PathBuf,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Path of the target store
    pub path: String,
    /// Table receiving the mapped records
    pub table_name: String,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> LoadResult<Self> {
        if !path.exists() {
            return Err(LoadError::Config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| LoadError::Config(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&raw)
            .map_err(|e| LoadError::Config(format!("{}: {}", path.display(), e)))
    }
}
