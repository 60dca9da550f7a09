use rusqlite::Connection;

use crate::error::PensumError;

pub fn run_migrations(conn: &Connection) -> Result<(), PensumError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS reminders (
            handle TEXT PRIMARY KEY,
            task_id TEXT NOT NULL,
            title TEXT NOT NULL,
            body TEXT,
            fire_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_reminders_fire_at ON reminders(fire_at);
        ",
    )?;
    Ok(())
}
