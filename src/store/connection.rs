use std::env;
use std::fs;
use std::path::PathBuf;

use rusqlite::Connection;

use crate::error::PensumError;

use super::migrations;

/// Resolve the data directory: `$PENSUM_DIR` if set, else `~/.pensum`.
pub fn data_dir() -> Result<PathBuf, PensumError> {
    if let Ok(dir) = env::var("PENSUM_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = env::var("HOME")
        .map_err(|_| PensumError::storage("Neither PENSUM_DIR nor HOME is set"))?;
    Ok(PathBuf::from(home).join(".pensum"))
}

pub fn db_path() -> Result<PathBuf, PensumError> {
    Ok(data_dir()?.join("pensum.db"))
}

/// Open a connection to the database. Returns error if not initialized.
pub fn open_db() -> Result<Connection, PensumError> {
    let path = db_path()?;
    if !path.exists() {
        return Err(PensumError::not_initialized());
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Initialize the database: create the data directory and run migrations.
pub fn init_db() -> Result<PathBuf, PensumError> {
    let path = db_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PensumError::storage(e.to_string()))?;
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(path)
}

fn configure_connection(conn: &Connection) -> Result<(), PensumError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;",
    )?;
    Ok(())
}
