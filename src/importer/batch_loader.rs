// ==========================================
// Transactional batch loader
// ==========================================
// One parameterized INSERT prepared from the schema's column order,
// executed per record inside a single transaction. The whole batch
// commits together; any failure rolls the whole batch back before the
// error is surfaced, so a file never leaves partial inserts behind.
// ==========================================

use crate::domain::record::TypedRecord;
use crate::domain::schema::{insert_columns, mtr_schema};
use crate::importer::error::{LoadError, LoadResult};
use crate::importer::loader_trait::BatchLoader;
use rusqlite::{Connection, ToSql, Transaction};

pub struct SqliteBatchLoader;

impl BatchLoader for SqliteBatchLoader {
    fn insert(
        &self,
        conn: &mut Connection,
        records: &[TypedRecord],
        table_name: &str,
    ) -> LoadResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let tx = conn
            .transaction()
            .map_err(|e| LoadError::Insert(e.to_string()))?;

        match Self::insert_all(&tx, records, table_name) {
            Ok(count) => {
                tx.commit().map_err(|e| LoadError::Insert(e.to_string()))?;
                Ok(count)
            }
            Err(e) => {
                // Roll back before surfacing; the original failure is
                // the one worth reporting
                if let Err(rollback_err) = tx.rollback() {
                    tracing::error!(error = %rollback_err, "rollback failed");
                }
                Err(e)
            }
        }
    }
}

impl SqliteBatchLoader {
    /// Execute the batch inside an open transaction. The statement
    /// handle lives only for the duration of this call.
    fn insert_all(
        tx: &Transaction,
        records: &[TypedRecord],
        table_name: &str,
    ) -> LoadResult<usize> {
        let sql = Self::insert_sql(table_name);
        let mut stmt = tx.prepare(&sql)?;

        let mut count = 0;
        for record in records {
            let mut params: Vec<&dyn ToSql> =
                record.values.iter().map(|v| v as &dyn ToSql).collect();
            params.push(&record.source_file);
            params.push(&record.loaded_at);
            params.push(&record.loaded_by);

            count += stmt.execute(params.as_slice())?;
        }

        Ok(count)
    }

    /// INSERT statement over the schema's columns plus provenance, in
    /// declaration order. Identifiers are quoted: column names are
    /// Cyrillic and the table name comes from configuration.
    fn insert_sql(table_name: &str) -> String {
        let columns = insert_columns(mtr_schema());
        let column_list = columns
            .iter()
            .map(|c| format!("\"{}\"", c))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=columns.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "INSERT INTO \"{}\" ({}) VALUES ({})",
            table_name, column_list, placeholders
        )
    }
}
