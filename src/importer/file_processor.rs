// ==========================================
// File processor - run orchestration
// ==========================================
// Drives the pipeline per file: read → map → load → record, with
// per-file isolation. Only a missing input directory is fatal; every
// other failure is contained to its file (or row) and the run
// continues.
// ==========================================

use crate::config::Settings;
use crate::domain::record::{FileOutcome, LoadContext, RunSummary};
use crate::domain::schema::mtr_schema;
use crate::importer::batch_loader::SqliteBatchLoader;
use crate::importer::error::{LoadError, LoadResult};
use crate::importer::loader_trait::{BatchLoader, RecordMapper, SheetReader};
use crate::importer::record_mapper::SchemaRecordMapper;
use crate::importer::sheet_reader::OdsSheetReader;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Spreadsheet extension accepted by the directory scan.
const INPUT_EXTENSION: &str = "ods";

pub struct FileProcessor {
    reader: Box<dyn SheetReader>,
    mapper: Box<dyn RecordMapper>,
    loader: Box<dyn BatchLoader>,
}

impl FileProcessor {
    pub fn new(
        reader: Box<dyn SheetReader>,
        mapper: Box<dyn RecordMapper>,
        loader: Box<dyn BatchLoader>,
    ) -> Self {
        Self {
            reader,
            mapper,
            loader,
        }
    }

    /// Processor wired with the production components.
    pub fn with_defaults() -> Self {
        Self::new(
            Box::new(OdsSheetReader),
            Box::new(SchemaRecordMapper),
            Box::new(SqliteBatchLoader),
        )
    }

    /// Process every eligible file in the configured directory.
    ///
    /// The connection is owned by the caller for the whole run; each
    /// file's insert forms its own transaction boundary on it.
    pub fn run(
        &self,
        conn: &mut Connection,
        settings: &Settings,
        ctx: &LoadContext,
    ) -> LoadResult<RunSummary> {
        let files = self.scan_input_dir(&settings.input_dir)?;

        let mut summary = RunSummary {
            files_found: files.len(),
            ..RunSummary::default()
        };

        if files.is_empty() {
            info!(dir = %settings.input_dir.display(), "no ODS files found");
            return Ok(summary);
        }

        for path in &files {
            let outcome = self.process_file(conn, path, &settings.database.table_name, ctx);
            summary.files_processed += 1;
            summary.total_rows_inserted += outcome.rows_inserted;
            summary.outcomes.push(outcome);
        }

        info!(
            files_found = summary.files_found,
            files_contributing = summary.files_contributing(),
            total_rows = summary.total_rows_inserted,
            "run complete"
        );

        Ok(summary)
    }

    /// List eligible files, sorted lexicographically by file name so
    /// runs are reproducible across filesystems.
    fn scan_input_dir(&self, input_dir: &Path) -> LoadResult<Vec<PathBuf>> {
        if !input_dir.is_dir() {
            return Err(LoadError::InputDirNotFound(
                input_dir.display().to_string(),
            ));
        }

        let mut files: Vec<PathBuf> = std::fs::read_dir(input_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e.eq_ignore_ascii_case(INPUT_EXTENSION))
            })
            .collect();

        files.sort_by_key(|p| p.file_name().map(|n| n.to_owned()));
        Ok(files)
    }

    /// Read → map → load one file. Never fails the run: every error
    /// ends up in the returned outcome.
    fn process_file(
        &self,
        conn: &mut Connection,
        path: &Path,
        table_name: &str,
        ctx: &LoadContext,
    ) -> FileOutcome {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        info!(file = %file_name, "processing file");

        let mut outcome = FileOutcome {
            file_name: file_name.clone(),
            rows_read: 0,
            rows_inserted: 0,
            error: None,
        };

        // Reading
        let rows = match self.reader.read(path) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(file = %file_name, error = %e, "file skipped: parse failure");
                outcome.error = Some(e.to_string());
                return outcome;
            }
        };

        if rows.len() <= 1 {
            info!(file = %file_name, "file has no data rows");
            return outcome;
        }
        outcome.rows_read = rows.len() - 1;

        // Mapping; row-level failures are logged and dropped
        let mapped = self.mapper.map(&rows, mtr_schema(), &file_name, ctx);
        for row_error in &mapped.skipped {
            warn!(file = %file_name, error = %row_error, "row skipped");
        }

        if mapped.records.is_empty() {
            info!(file = %file_name, "no mappable rows");
            return outcome;
        }

        // Loading; a failed batch is rolled back and contributes zero
        match self.loader.insert(conn, &mapped.records, table_name) {
            Ok(inserted) => {
                info!(file = %file_name, rows = inserted, "rows inserted");
                outcome.rows_inserted = inserted;
            }
            Err(e) => {
                error!(file = %file_name, error = %e, "batch insert failed, rolled back");
                outcome.error = Some(e.to_string());
            }
        }

        outcome
    }
}
