//! Machine-facing planner: one JSON request on stdin, JSON schedule on stdout.
//!
//! Request shape:
//! `{"wake_time": "2024-02-17T07:00:00Z", "tasks": [{"name": ..., "duration_minutes": ..., "effort_level": ...}]}`
//!
//! Planning starts one hour after `wake_time`.

use std::io::Read;

use chrono::{DateTime, Duration};
use serde::Deserialize;

use biosched_core::validation::validate_tasks;
use biosched_core::storage::BioConfig;
use biosched_core::{optimize_schedule, BioParams, Config, Task};

use super::CmdResult;

#[derive(Debug, Deserialize)]
struct ToolRequest {
    wake_time: String,
    tasks: Vec<Task>,
}

pub fn run() -> CmdResult {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let config = Config::load_or_default();
    println!("{}", respond(&input, &config.bio)?);
    Ok(())
}

fn respond(input: &str, bio: &BioConfig) -> Result<String, Box<dyn std::error::Error>> {
    let request: ToolRequest =
        serde_json::from_str(input).map_err(|e| format!("invalid arguments: {e}"))?;
    let wake = DateTime::parse_from_rfc3339(&request.wake_time)
        .map_err(|_| "invalid wake_time format, use RFC3339")?
        .naive_local();
    validate_tasks(&request.tasks)?;

    let params = BioParams::new(wake, bio.chronotype_lag, bio.fatigue_rate);
    let anchor = wake + Duration::hours(1);
    tracing::debug!(%anchor, tasks = request.tasks.len(), "planning tool request");

    let schedule = optimize_schedule(&request.tasks, anchor, &params);
    Ok(serde_json::to_string(&schedule)?)
}
