use std::path::Path;

use playtracker_common::{Error, Result};
use rusqlite::Connection;
use tracing::info;

const PRAGMAS: &str = "PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;";

/// Open (or create) the SQLite database at `path`, creating its parent
/// directory first.
pub fn open_database(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::Database(format!(
                "failed to create data directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let conn = Connection::open(path)
        .map_err(|e| Error::Database(format!("failed to open database: {e}")))?;
    configure(&conn)?;
    info!("connected to SQLite database at {}", path.display());
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()
        .map_err(|e| Error::Database(format!("failed to open in-memory database: {e}")))?;
    configure(&conn)?;
    Ok(conn)
}

fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch(PRAGMAS)
        .map_err(|e| Error::Database(format!("failed to set pragmas: {e}")))
}
