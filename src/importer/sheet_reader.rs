// ==========================================
// ODS sheet reader
// ==========================================
// Parses one .ods document into string rows via calamine. Every sheet
// of the document is read, in order; the first retained row of the
// whole document acts as the header for everything that follows.
// ==========================================

use crate::importer::error::{LoadError, LoadResult};
use crate::importer::loader_trait::SheetReader;
use calamine::{open_workbook, Ods, Reader};
use std::path::Path;

pub struct OdsSheetReader;

impl OdsSheetReader {
    fn file_label(path: &Path) -> String {
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string()
    }
}

impl SheetReader for OdsSheetReader {
    fn read(&self, file_path: &Path) -> LoadResult<Vec<Vec<String>>> {
        let file_label = Self::file_label(file_path);

        if !file_path.exists() {
            return Err(LoadError::parse(&file_label, "file not found"));
        }

        // Open the document
        let mut workbook: Ods<_> = open_workbook(file_path)
            .map_err(|e: calamine::OdsError| LoadError::parse(&file_label, e))?;

        // A spreadsheet document without a single table is structurally
        // broken; a table without rows is just empty input.
        let sheet_names = workbook.sheet_names().to_owned();
        if sheet_names.is_empty() {
            return Err(LoadError::parse(&file_label, "document contains no tables"));
        }

        let mut rows_out = Vec::new();
        for sheet_name in sheet_names {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| LoadError::parse(&file_label, e))?;

            for row in range.rows() {
                let cells: Vec<String> = row
                    .iter()
                    .map(|cell| cell.to_string().trim().to_string())
                    .collect();

                // Drop rows with zero non-empty cells
                if cells.iter().all(|c| c.is_empty()) {
                    continue;
                }

                rows_out.push(cells);
            }
        }

        Ok(rows_out)
    }
}
