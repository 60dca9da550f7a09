use chrono::Utc;
use serde_json::json;

use crate::cli::commands::RemindCommands;
use crate::error::PensumError;
use crate::notify::{pending_reminders, pop_due_reminders};
use crate::output;
use crate::store::connection;

pub fn run(cmd: RemindCommands, json_output: bool) -> i32 {
    let result = match cmd {
        RemindCommands::List => run_list(json_output),
        RemindCommands::Fire => run_fire(json_output),
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

fn run_list(json_output: bool) -> Result<i32, PensumError> {
    let conn = connection::open_db()?;
    let reminders = pending_reminders(&conn)?;

    if json_output {
        let reminders_json: Vec<_> = reminders.iter().map(output::json::reminder_json).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "reminders": reminders_json
            })))
            .unwrap()
        );
    } else {
        output::text::print_reminders(&reminders);
    }
    Ok(0)
}

fn run_fire(json_output: bool) -> Result<i32, PensumError> {
    let conn = connection::open_db()?;
    let fired = pop_due_reminders(&conn, Utc::now())?;

    if json_output {
        let fired_json: Vec<_> = fired.iter().map(output::json::reminder_json).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "fired": fired_json
            })))
            .unwrap()
        );
    } else if fired.is_empty() {
        println!("No reminders due.");
    } else {
        for r in &fired {
            println!("Reminder: {}", r.title);
            if let Some(ref body) = r.body {
                println!("  {body}");
            }
        }
    }
    Ok(0)
}
