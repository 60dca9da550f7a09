use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::error::PensumError;

use super::scheduler::{Notifier, ReminderPayload};

/// Production [`Notifier`]: reminders are rows in the `reminders` table,
/// delivered by `pensum remind fire`. Permission maps to the persisted
/// notifications setting.
pub struct SpoolNotifier<'a> {
    conn: &'a Connection,
    enabled: bool,
}

impl<'a> SpoolNotifier<'a> {
    pub fn new(conn: &'a Connection, enabled: bool) -> Self {
        Self { conn, enabled }
    }
}

impl Notifier for SpoolNotifier<'_> {
    fn request_permission(&self) -> bool {
        self.enabled
    }

    fn schedule_at(
        &self,
        seconds_from_now: i64,
        payload: ReminderPayload,
    ) -> Result<String, PensumError> {
        let handle = ulid::Ulid::new().to_string();
        let fire_at = Utc::now().timestamp() + seconds_from_now;
        self.conn
            .execute(
                "INSERT INTO reminders (handle, task_id, title, body, fire_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![handle, payload.task_id, payload.title, payload.body, fire_at],
            )
            .map_err(|e| PensumError::notifier(e.to_string()))?;
        Ok(handle)
    }

    fn cancel(&self, handle: &str) -> Result<(), PensumError> {
        // Zero rows affected means already fired or never scheduled.
        self.conn
            .execute("DELETE FROM reminders WHERE handle = ?1", params![handle])
            .map_err(|e| PensumError::notifier(e.to_string()))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingReminder {
    pub handle: String,
    pub task_id: String,
    pub title: String,
    pub body: Option<String>,
    pub fire_at: DateTime<Utc>,
}

pub fn pending_reminders(conn: &Connection) -> Result<Vec<PendingReminder>, PensumError> {
    let mut stmt = conn.prepare(
        "SELECT handle, task_id, title, body, fire_at FROM reminders ORDER BY fire_at ASC",
    )?;
    let reminders = stmt
        .query_map([], row_to_reminder)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(reminders)
}

/// Remove and return every reminder whose fire time has arrived.
pub fn pop_due_reminders(
    conn: &Connection,
    now: DateTime<Utc>,
) -> Result<Vec<PendingReminder>, PensumError> {
    let mut stmt = conn.prepare(
        "SELECT handle, task_id, title, body, fire_at FROM reminders
         WHERE fire_at <= ?1 ORDER BY fire_at ASC",
    )?;
    let due = stmt
        .query_map(params![now.timestamp()], row_to_reminder)?
        .collect::<Result<Vec<_>, _>>()?;
    conn.execute(
        "DELETE FROM reminders WHERE fire_at <= ?1",
        params![now.timestamp()],
    )?;
    Ok(due)
}

fn row_to_reminder(row: &rusqlite::Row) -> rusqlite::Result<PendingReminder> {
    let fire_at: i64 = row.get(4)?;
    Ok(PendingReminder {
        handle: row.get(0)?,
        task_id: row.get(1)?,
        title: row.get(2)?,
        body: row.get(3)?,
        fire_at: DateTime::from_timestamp(fire_at, 0).unwrap_or_default(),
    })
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

    fn payload(task_id: &str) -> ReminderPayload {
        ReminderPayload {
            task_id: task_id.to_string(),
            title: "Study session".to_string(),
            body: None,
        }
    }

    #[test]
    fn permission_follows_the_setting() {
        let conn = open();
        assert!(SpoolNotifier::new(&conn, true).request_permission());
        assert!(!SpoolNotifier::new(&conn, false).request_permission());
    }

    #[test]
    fn schedule_then_cancel_removes_the_row() {
        let conn = open();
        let notifier = SpoolNotifier::new(&conn, true);
        let handle = notifier.schedule_at(3600, payload("t1")).unwrap();
        assert_eq!(pending_reminders(&conn).unwrap().len(), 1);

        notifier.cancel(&handle).unwrap();
        assert!(pending_reminders(&conn).unwrap().is_empty());
        // Cancelling again is a no-op, not an error.
        notifier.cancel(&handle).unwrap();
        notifier.cancel("never-scheduled").unwrap();
    }

    #[test]
    fn pop_due_takes_only_ripe_reminders() {
        let conn = open();
        let notifier = SpoolNotifier::new(&conn, true);
        notifier.schedule_at(1, payload("soon")).unwrap();
        notifier.schedule_at(3600, payload("later")).unwrap();

        let now = Utc::now() + chrono::Duration::seconds(5);
        let fired = pop_due_reminders(&conn, now).unwrap();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].task_id, "soon");

        let left = pending_reminders(&conn).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].task_id, "later");
    }
}
