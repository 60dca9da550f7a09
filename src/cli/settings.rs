use serde_json::json;

use crate::cli::commands::SettingsCommands;
use crate::cli::task::open_repo;
use crate::error::PensumError;
use crate::output;
use crate::store::{connection, records, SqliteStore};

pub fn run(cmd: SettingsCommands, json_output: bool) -> i32 {
    let result = match cmd {
        SettingsCommands::Show => run_show(json_output),
        SettingsCommands::Notifications { state } => run_notifications(&state, json_output),
        SettingsCommands::Reset => run_reset(json_output),
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

fn run_show(json_output: bool) -> Result<i32, PensumError> {
    let conn = connection::open_db()?;
    let store = SqliteStore::new(&conn);
    let settings = records::load_settings(&store)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "settings": output::json::settings_json(&settings)
            })))
            .unwrap()
        );
    } else {
        output::text::print_settings(&settings);
    }
    Ok(0)
}

fn run_notifications(state: &str, json_output: bool) -> Result<i32, PensumError> {
    let enabled = match state {
        "on" => true,
        "off" => false,
        _ => {
            return Err(PensumError::validation(format!(
                "Unknown state '{state}' (expected on or off)"
            )))
        }
    };

    let conn = connection::open_db()?;
    let store = SqliteStore::new(&conn);
    let mut settings = records::load_settings(&store)?;
    settings.notifications_enabled = enabled;
    records::save_settings(&store, &settings)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "settings": output::json::settings_json(&settings)
            })))
            .unwrap()
        );
    } else {
        output::text::print_settings(&settings);
    }
    Ok(0)
}

fn run_reset(json_output: bool) -> Result<i32, PensumError> {
    let conn = connection::open_db()?;
    // Route the wipe through the repository so live reminders are
    // cancelled before the records that own them disappear.
    let repo = open_repo(&conn)?;
    repo.reset()?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({ "reset": true }))).unwrap()
        );
    } else {
        println!("All data cleared.");
    }
    Ok(0)
}
