use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::error::PensumError;
use crate::models::{AppSettings, Profile, Task};
use crate::notify::PendingReminder;
use crate::view::{self, Stats};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &PensumError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn task_json(t: &Task, now: DateTime<Utc>) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "description": t.description,
        "category": t.category,
        "priority": t.priority.as_str(),
        "status": view::status_label(t, now),
        "start_time": t.start_time.to_rfc3339(),
        "end_time": t.end_time.to_rfc3339(),
        "completed": t.completed,
        "created_at": t.created_at.to_rfc3339(),
        "has_reminder": t.notification_handle.is_some()
    })
}

pub fn stats_json(s: &Stats) -> Value {
    json!({
        "total": s.total,
        "active": s.active,
        "in_progress": s.in_progress,
        "completed": s.completed,
        "completion_percentage": s.completion_percentage
    })
}

pub fn reminder_json(r: &PendingReminder) -> Value {
    json!({
        "handle": r.handle,
        "task_id": r.task_id,
        "title": r.title,
        "body": r.body,
        "fire_at": r.fire_at.to_rfc3339()
    })
}

pub fn settings_json(s: &AppSettings) -> Value {
    json!({
        "notifications_enabled": s.notifications_enabled
    })
}

pub fn profile_json(p: &Profile) -> Value {
    json!({
        "username": p.username,
        "age": p.age,
        "bio": p.bio
    })
}
