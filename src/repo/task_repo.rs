use chrono::{DateTime, Utc};
use ulid::Ulid;

use crate::error::PensumError;
use crate::models::{self, Task, TaskDraft, ValidationMode};
use crate::notify::{Notifier, Scheduler};
use crate::store::{DurableStore, TASKS_KEY};

/// Single writer of the task collection. Every mutation reloads the
/// collection fresh, applies the change, drives the scheduler, and
/// writes the whole collection back in one replace.
pub struct TaskRepository<S: DurableStore, N: Notifier> {
    store: S,
    scheduler: Scheduler<N>,
}

impl<S: DurableStore, N: Notifier> TaskRepository<S, N> {
    pub fn new(store: S, scheduler: Scheduler<N>) -> Self {
        Self { store, scheduler }
    }

    /// Load the full collection. An absent key is an empty collection
    /// (first run); an unparseable payload is a storage error.
    pub fn list(&self) -> Result<Vec<Task>, PensumError> {
        match self.store.get(TASKS_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| PensumError::storage(format!("Corrupt task collection: {e}"))),
            None => Ok(Vec::new()),
        }
    }

    /// Resolve a task by exact id or unique id prefix.
    pub fn resolve(&self, reference: &str) -> Result<Task, PensumError> {
        let tasks = self.list()?;
        if let Some(task) = tasks.iter().find(|t| t.id == reference) {
            return Ok(task.clone());
        }
        let matches: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.id.starts_with(reference))
            .collect();
        match matches.len() {
            0 => Err(PensumError::task_not_found(reference)),
            1 => Ok(matches[0].clone()),
            _ => Err(PensumError::validation(format!(
                "Ambiguous task reference '{reference}'"
            ))),
        }
    }

    pub fn create(&self, draft: &TaskDraft, now: DateTime<Utc>) -> Result<Task, PensumError> {
        let valid = models::validate(draft, ValidationMode::Create, now)?;
        let mut tasks = self.list()?;

        let mut task = Task {
            id: Ulid::new().to_string(),
            title: valid.title,
            description: valid.description,
            category: valid.category,
            priority: valid.priority,
            start_time: valid.start_time,
            end_time: valid.end_time,
            completed: false,
            created_at: now,
            notification_handle: None,
        };
        task.notification_handle = self.scheduler.schedule(&task, now);

        // Newest first.
        tasks.insert(0, task.clone());
        self.persist(&tasks)?;
        Ok(task)
    }

    pub fn update(
        &self,
        id: &str,
        draft: &TaskDraft,
        now: DateTime<Utc>,
    ) -> Result<Task, PensumError> {
        let valid = models::validate(draft, ValidationMode::Edit, now)?;
        let mut tasks = self.list()?;
        let idx = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| PensumError::task_not_found(id))?;

        let mut task = tasks[idx].clone();
        let start_changed = task.start_time != valid.start_time;
        task.title = valid.title;
        task.description = valid.description;
        task.category = valid.category;
        task.priority = valid.priority;
        task.start_time = valid.start_time;
        task.end_time = valid.end_time;

        if start_changed {
            let old_handle = task.notification_handle.clone();
            if let Some(ref handle) = old_handle {
                self.scheduler.cancel(handle);
            }
            // Rescheduling is best-effort: with no permission the old
            // (now dead, idempotently cancellable) handle is kept.
            task.notification_handle = self.scheduler.schedule(&task, now).or(old_handle);
        }

        tasks[idx] = task.clone();
        self.persist(&tasks)?;
        Ok(task)
    }

    /// Flip `completed`. The notification handle is deliberately left
    /// alone: a reminder for a task completed early may still fire.
    pub fn toggle_complete(&self, id: &str) -> Result<Task, PensumError> {
        let mut tasks = self.list()?;
        let idx = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| PensumError::task_not_found(id))?;
        tasks[idx].completed = !tasks[idx].completed;
        let task = tasks[idx].clone();
        self.persist(&tasks)?;
        Ok(task)
    }

    pub fn delete(&self, id: &str) -> Result<(), PensumError> {
        let mut tasks = self.list()?;
        let idx = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| PensumError::task_not_found(id))?;
        if let Some(ref handle) = tasks[idx].notification_handle {
            self.scheduler.cancel(handle);
        }
        tasks.remove(idx);
        self.persist(&tasks)?;
        Ok(())
    }

    /// Wipe every stored record, cancelling live reminders first so no
    /// orphaned notification outlives its task.
    pub fn reset(&self) -> Result<(), PensumError> {
        if let Ok(tasks) = self.list() {
            for task in &tasks {
                if let Some(ref handle) = task.notification_handle {
                    self.scheduler.cancel(handle);
                }
            }
        }
        self.store.clear()
    }

    fn persist(&self, tasks: &[Task]) -> Result<(), PensumError> {
        // Serialize before writing: a failure here leaves the persisted
        // collection untouched.
        let raw = serde_json::to_string(tasks).map_err(|e| PensumError::storage(e.to_string()))?;
        self.store.set(TASKS_KEY, &raw)
    }
}
