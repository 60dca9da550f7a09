use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PensumError;
use crate::models::Task;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderPayload {
    pub task_id: String,
    pub title: String,
    pub body: Option<String>,
}

/// Seam for the platform reminder service. Permission denial is a normal
/// outcome; `cancel` must be idempotent on unknown or already-fired
/// handles.
pub trait Notifier {
    fn request_permission(&self) -> bool;
    fn schedule_at(
        &self,
        seconds_from_now: i64,
        payload: ReminderPayload,
    ) -> Result<String, PensumError>;
    fn cancel(&self, handle: &str) -> Result<(), PensumError>;
}

/// Wraps a [`Notifier`] with the task-to-reminder policy: at most one
/// live reminder per task, and a reminder failure never blocks a save.
pub struct Scheduler<N: Notifier> {
    notifier: N,
}

impl<N: Notifier> Scheduler<N> {
    pub fn new(notifier: N) -> Self {
        Self { notifier }
    }

    /// Schedule a reminder at the task's start time. Returns the handle,
    /// or `None` when permission is denied or the notifier fails — the
    /// task is saved without a reminder either way.
    pub fn schedule(&self, task: &Task, now: DateTime<Utc>) -> Option<String> {
        if !self.notifier.request_permission() {
            return None;
        }
        let seconds_until = (task.start_time - now).num_seconds().max(1);
        let payload = ReminderPayload {
            task_id: task.id.clone(),
            title: task.title.clone(),
            body: task.description.clone(),
        };
        match self.notifier.schedule_at(seconds_until, payload) {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(task_id = %task.id, "failed to schedule reminder: {e}");
                None
            }
        }
    }

    /// Cancel a previously scheduled reminder. Failures are logged and
    /// swallowed so the surrounding mutation always completes.
    pub fn cancel(&self, handle: &str) {
        if let Err(e) = self.notifier.cancel(handle) {
            tracing::warn!(handle, "failed to cancel reminder: {e}");
        }
    }
}
