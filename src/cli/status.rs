use chrono::Utc;
use serde_json::json;

use crate::cli::task::open_repo;
use crate::error::PensumError;
use crate::output;
use crate::store::connection;
use crate::view;

pub fn run(json_output: bool) -> i32 {
    match run_inner(json_output) {
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

fn run_inner(json_output: bool) -> Result<i32, PensumError> {
    let conn = connection::open_db()?;
    let repo = open_repo(&conn)?;
    let now = Utc::now();

    let tasks = repo.list()?;
    let stats = view::stats(&tasks, now);
    let in_progress: Vec<_> = tasks
        .iter()
        .filter(|t| t.classify(now).in_progress)
        .collect();

    if json_output {
        let in_progress_json: Vec<_> = in_progress
            .iter()
            .map(|t| output::json::task_json(t, now))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "stats": output::json::stats_json(&stats),
                "in_progress": in_progress_json
            })))
            .unwrap()
        );
    } else {
        output::text::print_stats(&stats);
        if !in_progress.is_empty() {
            println!("\nIn progress:");
            for t in &in_progress {
                println!("  {} - {}", t.id, t.title);
            }
        }
    }
    Ok(0)
}
