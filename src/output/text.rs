use chrono::{DateTime, Utc};

use crate::models::{AppSettings, Profile, Task};
use crate::notify::PendingReminder;
use crate::view::{self, Stats};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn print_task(t: &Task, now: DateTime<Utc>) {
    println!("Task: {} ({})", t.title, t.id);
    if let Some(ref desc) = t.description {
        println!("  Description: {desc}");
    }
    println!("  Category: {}", t.category);
    println!("  Priority: {}", t.priority.as_str());
    println!("  Status: {}", view::status_label(t, now));
    println!(
        "  Window: {} to {}",
        t.start_time.format(TIME_FORMAT),
        t.end_time.format(TIME_FORMAT)
    );
    if t.notification_handle.is_some() {
        println!("  Reminder: scheduled");
    }
}

pub fn print_task_list(tasks: &[Task], now: DateTime<Utc>) {
    if tasks.is_empty() {
        println!("No tasks yet. Add one with `pensum task add`.");
        return;
    }
    for t in tasks {
        println!(
            "  [{}] {} ({}) {} {} {}",
            view::status_label(t, now),
            t.title,
            &t.id[..std::cmp::min(8, t.id.len())],
            t.category,
            // Priority shows as emphasis only; it never affects order.
            "!".repeat(t.priority.weight() as usize),
            t.start_time.format(TIME_FORMAT)
        );
    }
}

pub fn print_stats(s: &Stats) {
    println!("Completion: {}%", s.completion_percentage);
    println!(
        "  total={} active={} in_progress={} completed={}",
        s.total, s.active, s.in_progress, s.completed
    );
}

pub fn print_reminders(reminders: &[PendingReminder]) {
    if reminders.is_empty() {
        println!("No pending reminders.");
        return;
    }
    for r in reminders {
        println!(
            "  {} at {} ({})",
            r.title,
            r.fire_at.format(TIME_FORMAT),
            &r.handle[..std::cmp::min(8, r.handle.len())]
        );
    }
}

pub fn print_settings(s: &AppSettings) {
    println!(
        "Notifications: {}",
        if s.notifications_enabled { "on" } else { "off" }
    );
}

pub fn print_profile(p: &Profile) {
    println!("Profile: {}", p.username);
    if let Some(age) = p.age {
        println!("  Age: {age}");
    }
    if let Some(ref bio) = p.bio {
        println!("  Bio: {bio}");
    }
}
