//! Derived presentation state. Everything here is a pure function of
//! `(collection, now)` and is recomputed on every read — classification
//! drifts with the clock even when no mutation happens.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Task;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: i64,
    pub active: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub completion_percentage: i64,
}

/// Aggregate counts. The completion percentage is completed-over-due,
/// rounded, and defined as 0 when nothing is due yet.
pub fn stats(tasks: &[Task], now: DateTime<Utc>) -> Stats {
    let mut s = Stats {
        total: tasks.len() as i64,
        ..Stats::default()
    };
    let mut due = 0i64;
    for task in tasks {
        let c = task.classify(now);
        if task.completed {
            s.completed += 1;
        } else {
            s.active += 1;
        }
        if c.in_progress {
            s.in_progress += 1;
        }
        if c.due {
            due += 1;
        }
    }
    s.completion_percentage = if due > 0 {
        (100.0 * s.completed as f64 / due as f64).round() as i64
    } else {
        0
    };
    s
}

/// Display order: incomplete before completed, then (among incomplete)
/// not-yet-ended before ended, then ascending start time. The sort is
/// stable, so equal keys keep their insertion order.
pub fn sort_tasks(tasks: &[Task], now: DateTime<Utc>) -> Vec<Task> {
    let mut ordered = tasks.to_vec();
    ordered.sort_by(|a, b| {
        let a_ended = !a.completed && a.classify(now).ended;
        let b_ended = !b.completed && b.classify(now).ended;
        a.completed
            .cmp(&b.completed)
            .then_with(|| a_ended.cmp(&b_ended))
            .then_with(|| a.start_time.cmp(&b.start_time))
    });
    ordered
}

/// One-word state for display.
pub fn status_label(task: &Task, now: DateTime<Utc>) -> &'static str {
    if task.completed {
        return "completed";
    }
    let c = task.classify(now);
    if c.in_progress {
        "in_progress"
    } else if c.ended {
        "ended"
    } else {
        "upcoming"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::Duration;

    fn task(id: &str, start_min: i64, end_min: i64, completed: bool, now: DateTime<Utc>) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_string(),
            description: None,
            category: "study".to_string(),
            priority: Priority::Medium,
            start_time: now + Duration::minutes(start_min),
            end_time: now + Duration::minutes(end_min),
            completed,
            created_at: now,
            notification_handle: None,
        }
    }

    #[test]
    fn stats_on_empty_collection_are_zero() {
        let now = Utc::now();
        let s = stats(&[], now);
        assert_eq!(s, Stats::default());
    }

    #[test]
    fn percentage_is_zero_when_nothing_is_due() {
        let now = Utc::now();
        // Both tasks start in the future and neither is completed.
        let tasks = vec![task("a", 10, 20, false, now), task("b", 30, 40, false, now)];
        let s = stats(&tasks, now);
        assert_eq!(s.completion_percentage, 0);
        assert_eq!(s.active, 2);
    }

    #[test]
    fn percentage_counts_completed_over_due() {
        let now = Utc::now();
        let tasks = vec![
            task("done", -60, -30, true, now),
            task("started", -10, 10, false, now),
            task("future", 60, 120, false, now),
        ];
        // Two due (done + started), one completed: 50%.
        let s = stats(&tasks, now);
        assert_eq!(s.completion_percentage, 50);
        assert_eq!(s.in_progress, 1);
        assert_eq!(s.active, 2);
        assert_eq!(s.completed, 1);
    }

    #[test]
    fn percentage_stays_within_bounds() {
        let now = Utc::now();
        let all_done = vec![task("a", -20, -10, true, now), task("b", 10, 20, true, now)];
        assert_eq!(stats(&all_done, now).completion_percentage, 100);

        let third = vec![
            task("a", -20, -10, true, now),
            task("b", -20, -10, false, now),
            task("c", -20, -10, false, now),
        ];
        assert_eq!(stats(&third, now).completion_percentage, 33);
    }

    #[test]
    fn sort_puts_in_progress_then_ended_then_completed() {
        let now = Utc::now();
        let tasks = vec![
            task("current", -60, 60, false, now),
            task("done", -120, -60, true, now),
            task("over", -120, -60, false, now),
        ];
        let ids: Vec<String> = sort_tasks(&tasks, now).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["current", "over", "done"]);
    }

    #[test]
    fn sort_orders_by_start_within_a_tier() {
        let now = Utc::now();
        let tasks = vec![
            task("later", 120, 180, false, now),
            task("sooner", 10, 20, false, now),
        ];
        let ids: Vec<String> = sort_tasks(&tasks, now).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["sooner", "later"]);
    }

    #[test]
    fn sort_is_stable_and_idempotent() {
        let now = Utc::now();
        let shared_start = vec![
            task("first", 10, 20, false, now),
            task("second", 10, 30, false, now),
            task("third", 10, 40, false, now),
        ];
        let once = sort_tasks(&shared_start, now);
        let ids: Vec<&str> = once.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);

        let twice = sort_tasks(&once, now);
        assert_eq!(once, twice);
    }

    #[test]
    fn status_labels() {
        let now = Utc::now();
        assert_eq!(status_label(&task("a", 10, 20, false, now), now), "upcoming");
        assert_eq!(
            status_label(&task("b", -10, 10, false, now), now),
            "in_progress"
        );
        assert_eq!(status_label(&task("c", -20, -10, false, now), now), "ended");
        assert_eq!(
            status_label(&task("d", -20, -10, true, now), now),
            "completed"
        );
    }
}
