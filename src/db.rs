// ==========================================
// SQLite connection bootstrap
// ==========================================
// Goals:
// - One place for Connection::open + PRAGMA, so every caller gets the
//   same foreign-key and busy-timeout behavior
// - Open failures are fatal Connection errors, surfaced before any
//   file is processed
// ==========================================

use crate::importer::error::{LoadError, LoadResult};
use rusqlite::Connection;
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Apply the unified PRAGMAs to a connection.
///
/// foreign_keys and busy_timeout are per-connection settings and must
/// be applied to every connection this crate opens.
pub fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open the target store and apply the unified configuration.
///
/// The connection is opened once per run and owned by the caller for
/// the run's lifetime; each file's batch insert forms its own
/// transaction on top of it.
pub fn open_connection(db_path: &str) -> LoadResult<Connection> {
    let conn = Connection::open(db_path)
        .map_err(|e| LoadError::Connection(format!("{}: {}", db_path, e)))?;
    configure_connection(&conn).map_err(|e| LoadError::Connection(e.to_string()))?;
    Ok(conn)
}
