use rusqlite::{params, Connection, OptionalExtension};

use crate::error::PensumError;

/// Storage key for the serialized task collection. The task repository
/// is the only writer of this key.
pub const TASKS_KEY: &str = "tasks_list";
pub const PROFILE_KEY: &str = "user_profile";
pub const SETTINGS_KEY: &str = "app_settings";

/// Key-value persistence contract. Records are opaque serialized blobs;
/// an absent key is a normal outcome, not an error.
pub trait DurableStore {
    fn get(&self, key: &str) -> Result<Option<String>, PensumError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PensumError>;
    /// Full wipe of every record.
    fn clear(&self) -> Result<(), PensumError>;
}

pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl DurableStore for SqliteStore<'_> {
    fn get(&self, key: &str) -> Result<Option<String>, PensumError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PensumError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn clear(&self) -> Result<(), PensumError> {
        self.conn.execute("DELETE FROM kv", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::migrations;

    fn open() -> Connection {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        migrations::run_migrations(&conn).expect("migrations");
        conn
    }

    #[test]
    fn get_absent_key_is_none() {
        let conn = open();
        let store = SqliteStore::new(&conn);
        assert_eq!(store.get(TASKS_KEY).unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips_and_overwrites() {
        let conn = open();
        let store = SqliteStore::new(&conn);
        store.set(TASKS_KEY, "[]").unwrap();
        assert_eq!(store.get(TASKS_KEY).unwrap().as_deref(), Some("[]"));
        store.set(TASKS_KEY, "[1]").unwrap();
        assert_eq!(store.get(TASKS_KEY).unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn clear_wipes_every_key() {
        let conn = open();
        let store = SqliteStore::new(&conn);
        store.set(TASKS_KEY, "[]").unwrap();
        store.set(PROFILE_KEY, "{}").unwrap();
        store.clear().unwrap();
        assert_eq!(store.get(TASKS_KEY).unwrap(), None);
        assert_eq!(store.get(PROFILE_KEY).unwrap(), None);
    }
}
