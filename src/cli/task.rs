use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use rusqlite::Connection;
use serde_json::json;

use crate::cli::commands::TaskCommands;
use crate::error::PensumError;
use crate::models::{CategoryChoice, Priority, Task, TaskDraft};
use crate::notify::{Scheduler, SpoolNotifier};
use crate::output;
use crate::repo::TaskRepository;
use crate::store::{connection, records, SqliteStore};
use crate::view;

pub type CliRepository<'a> = TaskRepository<SqliteStore<'a>, SpoolNotifier<'a>>;

/// Wire the repository to the sqlite-backed store and spool notifier.
/// Notification permission is the persisted settings toggle.
pub fn open_repo(conn: &Connection) -> Result<CliRepository<'_>, PensumError> {
    let store = SqliteStore::new(conn);
    let settings = records::load_settings(&store)?;
    let notifier = SpoolNotifier::new(conn, settings.notifications_enabled);
    Ok(TaskRepository::new(store, Scheduler::new(notifier)))
}

pub fn run(cmd: TaskCommands, json_output: bool) -> i32 {
    let result = match cmd {
        TaskCommands::Add {
            title,
            description,
            category,
            custom_category,
            priority,
            start,
            end,
        } => run_add(
            title,
            description,
            &category,
            custom_category,
            &priority,
            &start,
            &end,
            json_output,
        ),
        TaskCommands::List => run_list(json_output),
        TaskCommands::Show { id } => run_show(&id, json_output),
        TaskCommands::Edit {
            id,
            title,
            description,
            category,
            custom_category,
            priority,
            start,
            end,
        } => run_edit(
            &id,
            title,
            description,
            category,
            custom_category,
            priority,
            start,
            end,
            json_output,
        ),
        TaskCommands::Done { id } => run_done(&id, json_output),
        TaskCommands::Delete { id } => run_delete(&id, json_output),
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::json::error(&e)).unwrap()
                );
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_add(
    title: String,
    description: Option<String>,
    category: &str,
    custom_category: Option<String>,
    priority: &str,
    start: &str,
    end: &str,
    json_output: bool,
) -> Result<i32, PensumError> {
    let conn = connection::open_db()?;
    let repo = open_repo(&conn)?;
    let now = Utc::now();

    let draft = TaskDraft {
        title,
        description,
        category: parse_category(category)?,
        custom_category,
        priority: parse_priority(priority)?,
        start_time: parse_instant(start, now)?,
        end_time: parse_instant(end, now)?,
    };
    let task = repo.create(&draft, now)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_json(&task, now)
            })))
            .unwrap()
        );
    } else {
        println!("Added task: {} ({})", task.title, task.id);
        if task.notification_handle.is_some() {
            println!(
                "  Reminder scheduled for {}",
                task.start_time.format("%Y-%m-%d %H:%M")
            );
        } else {
            println!("  Saved without a reminder (notifications are off)");
        }
    }
    Ok(0)
}

fn run_list(json_output: bool) -> Result<i32, PensumError> {
    let conn = connection::open_db()?;
    let repo = open_repo(&conn)?;
    let now = Utc::now();

    let tasks = repo.list()?;
    let ordered = view::sort_tasks(&tasks, now);
    let stats = view::stats(&tasks, now);

    if json_output {
        let tasks_json: Vec<_> = ordered
            .iter()
            .map(|t| output::json::task_json(t, now))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "tasks": tasks_json,
                "stats": output::json::stats_json(&stats)
            })))
            .unwrap()
        );
    } else {
        output::text::print_task_list(&ordered, now);
    }
    Ok(0)
}

fn run_show(id: &str, json_output: bool) -> Result<i32, PensumError> {
    let conn = connection::open_db()?;
    let repo = open_repo(&conn)?;
    let now = Utc::now();
    let task = repo.resolve(id)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_json(&task, now)
            })))
            .unwrap()
        );
    } else {
        output::text::print_task(&task, now);
    }
    Ok(0)
}

#[allow(clippy::too_many_arguments)]
fn run_edit(
    id: &str,
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    custom_category: Option<String>,
    priority: Option<String>,
    start: Option<String>,
    end: Option<String>,
    json_output: bool,
) -> Result<i32, PensumError> {
    let conn = connection::open_db()?;
    let repo = open_repo(&conn)?;
    let now = Utc::now();

    // Load the canonical record, derive a draft, overlay the provided
    // fields, then commit through validation.
    let task = repo.resolve(id)?;
    let mut draft = draft_from_task(&task);
    if let Some(t) = title {
        draft.title = t;
    }
    if let Some(d) = description {
        draft.description = if d.is_empty() { None } else { Some(d) };
    }
    if let Some(c) = category {
        draft.category = parse_category(&c)?;
        if draft.category != CategoryChoice::Other {
            draft.custom_category = None;
        }
    }
    if let Some(label) = custom_category {
        draft.category = CategoryChoice::Other;
        draft.custom_category = Some(label);
    }
    if let Some(p) = priority {
        draft.priority = parse_priority(&p)?;
    }
    if let Some(s) = start {
        draft.start_time = parse_instant(&s, now)?;
    }
    if let Some(e) = end {
        draft.end_time = parse_instant(&e, now)?;
    }

    let updated = repo.update(&task.id, &draft, now)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_json(&updated, now)
            })))
            .unwrap()
        );
    } else {
        println!("Updated task: {} ({})", updated.title, updated.id);
    }
    Ok(0)
}

fn run_done(id: &str, json_output: bool) -> Result<i32, PensumError> {
    let conn = connection::open_db()?;
    let repo = open_repo(&conn)?;
    let now = Utc::now();

    let task = repo.resolve(id)?;
    let updated = repo.toggle_complete(&task.id)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_json(&updated, now)
            })))
            .unwrap()
        );
    } else if updated.completed {
        println!("Task {} marked complete", updated.id);
    } else {
        println!("Task {} marked incomplete", updated.id);
    }
    Ok(0)
}

fn run_delete(id: &str, json_output: bool) -> Result<i32, PensumError> {
    let conn = connection::open_db()?;
    let repo = open_repo(&conn)?;

    let task = repo.resolve(id)?;
    repo.delete(&task.id)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "deleted": { "id": task.id, "title": task.title }
            })))
            .unwrap()
        );
    } else {
        println!("Deleted task: {} ({})", task.title, task.id);
    }
    Ok(0)
}

fn draft_from_task(task: &Task) -> TaskDraft {
    let (category, custom_category) = match CategoryChoice::from_str(&task.category) {
        Some(choice) if choice != CategoryChoice::Other => (choice, None),
        _ => (CategoryChoice::Other, Some(task.category.clone())),
    };
    TaskDraft {
        title: task.title.clone(),
        description: task.description.clone(),
        category,
        custom_category,
        priority: task.priority,
        start_time: task.start_time,
        end_time: task.end_time,
    }
}

fn parse_category(s: &str) -> Result<CategoryChoice, PensumError> {
    CategoryChoice::from_str(&s.to_lowercase()).ok_or_else(|| {
        PensumError::validation(format!(
            "Unknown category '{s}' (expected study, project, exam, exercise, or other)"
        ))
    })
}

fn parse_priority(s: &str) -> Result<Priority, PensumError> {
    Priority::from_str(&s.to_lowercase()).ok_or_else(|| {
        PensumError::validation(format!(
            "Unknown priority '{s}' (expected low, medium, or high)"
        ))
    })
}

/// Parse a CLI time value: RFC 3339, `YYYY-MM-DD HH:MM` (taken as UTC),
/// or an offset from now like `+90m`, `+2h`, `-1d`.
pub fn parse_instant(raw: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, PensumError> {
    let s = raw.trim();
    if let Some(rest) = s.strip_prefix('+') {
        if let Some(delta) = parse_offset(rest) {
            return Ok(now + delta);
        }
    } else if let Some(rest) = s.strip_prefix('-') {
        if let Some(delta) = parse_offset(rest) {
            return Ok(now - delta);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Ok(naive.and_utc());
    }
    Err(PensumError::validation(format!(
        "Unrecognized time '{raw}' (expected RFC 3339, \"YYYY-MM-DD HH:MM\", or +<n>m|h|d)"
    )))
}

fn parse_offset(rest: &str) -> Option<Duration> {
    let unit = rest.chars().last()?;
    let amount: i64 = rest[..rest.len() - unit.len_utf8()].parse().ok()?;
    match unit {
        'm' => Some(Duration::minutes(amount)),
        'h' => Some(Duration::hours(amount)),
        'd' => Some(Duration::days(amount)),
        _ => None,
    }
}
