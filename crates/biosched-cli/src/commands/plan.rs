//! Capacity-aware planning for one task or a JSON task list.

use std::path::PathBuf;

use clap::Args;

use biosched_core::validation::validate_tasks;
use biosched_core::{optimize_schedule, Config, SchedulePlan, Task};

use super::{now_minute, parse_when, CmdResult};

#[derive(Args)]
pub struct PlanArgs {
    /// Task name
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    name: Option<String>,
    /// Duration in minutes (whole 30-minute slots are booked)
    #[arg(required_unless_present = "file")]
    minutes: Option<u32>,
    /// Effort level 1-10
    #[arg(required_unless_present = "file")]
    effort: Option<u8>,
    /// JSON array of tasks ("-" reads stdin)
    #[arg(long)]
    file: Option<PathBuf>,
    /// Start of the planning horizon (HH:MM today or RFC3339); defaults to now
    #[arg(long)]
    from: Option<String>,
    /// Wake time override (HH:MM)
    #[arg(long)]
    wake: Option<String>,
    /// Output JSON
    #[arg(long)]
    json: bool,
}

fn read_tasks(args: &PlanArgs) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
    if let Some(path) = &args.file {
        let content = if path.as_os_str() == "-" {
            std::io::read_to_string(std::io::stdin())?
        } else {
            std::fs::read_to_string(path)?
        };
        return Ok(serde_json::from_str(&content)?);
    }

    match (&args.name, args.minutes, args.effort) {
        (Some(name), Some(minutes), Some(effort)) => {
            Ok(vec![Task::new(name.as_str(), minutes, effort)])
        }
        _ => Err("missing arguments: plan <name> <minutes> <effort>".into()),
    }
}

pub fn run(args: PlanArgs) -> CmdResult {
    let tasks = read_tasks(&args)?;
    validate_tasks(&tasks)?;

    let mut config = Config::load_or_default();
    if let Some(wake) = &args.wake {
        config.set("bio.wake_time", wake)?;
    }

    let now = now_minute();
    let anchor = match &args.from {
        Some(from) => parse_when(from, now.date())?,
        None => now,
    };
    let params = config.bio.params_for(anchor.date())?;

    let plan = SchedulePlan::new(optimize_schedule(&tasks, anchor, &params));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", render_table(&plan));
    }
    Ok(())
}

fn render_table(plan: &SchedulePlan) -> String {
    let rows: Vec<[String; 4]> = plan
        .schedule
        .iter()
        .map(|item| {
            [
                item.start_time.clone(),
                item.task_name.clone(),
                item.predicted_capacity
                    .map(|c| format!("{c:.2}"))
                    .unwrap_or_else(|| "-".to_string()),
                item.fit_score.to_string(),
            ]
        })
        .collect();

    let headers = ["START", "TASK", "CAPACITY", "FIT"];
    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 4]| -> String {
        let mut out = String::new();
        for (cell, width) in cells.iter().zip(widths) {
            out.push_str(&format!("{cell:<width$}   "));
        }
        out.trim_end().to_string() + "\n"
    };

    let mut output = format!("\n--- Optimized Schedule ({}) ---\n", plan.algorithm);
    output.push_str(&line(headers));
    output.push_str(&line(["-----", "----", "--------", "---"]));
    for row in &rows {
        output.push_str(&line([
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
        ]));
    }
    output.push('\n');
    output
}
