use serde_json::json;

use crate::cli::commands::ProfileCommands;
use crate::error::PensumError;
use crate::models::Profile;
use crate::output;
use crate::store::{connection, records, SqliteStore};

pub fn run(cmd: ProfileCommands, json_output: bool) -> i32 {
    let result = match cmd {
        ProfileCommands::Show => run_show(json_output),
        ProfileCommands::Set { name, age, bio } => run_set(name, age, bio, json_output),
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
    let profile = records::load_profile(&store)?;

    if json_output {
        let profile_json = profile
            .as_ref()
            .map(output::json::profile_json)
            .unwrap_or(serde_json::Value::Null);
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "profile": profile_json
            })))
            .unwrap()
        );
    } else {
        match profile {
            Some(p) => output::text::print_profile(&p),
            None => println!("No profile saved. Use `pensum profile set --name <name>`."),
        }
    }
    Ok(0)
}

fn run_set(
    name: Option<String>,
    age: Option<u32>,
    bio: Option<String>,
    json_output: bool,
) -> Result<i32, PensumError> {
    let conn = connection::open_db()?;
    let store = SqliteStore::new(&conn);
    let mut profile = records::load_profile(&store)?.unwrap_or_default();

    if let Some(name) = name {
        profile.username = name;
    }
    if let Some(age) = age {
        profile.age = Some(age);
    }
    if let Some(bio) = bio {
        profile.bio = if bio.is_empty() { None } else { Some(bio) };
    }
    if profile.username.trim().is_empty() {
        return Err(PensumError::validation("Profile name is required"));
    }
    records::save_profile(&store, &profile)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "profile": output::json::profile_json(&profile)
            })))
            .unwrap()
        );
    } else {
        output::text::print_profile(&profile);
    }
    Ok(0)
}
