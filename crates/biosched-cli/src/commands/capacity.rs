//! Live capacity from the configured biological parameters.

use clap::Args;

use biosched_core::{CapacityReport, Config};

use super::{now_minute, parse_when, print_report, CmdResult};

#[derive(Args)]
pub struct CapacityArgs {
    /// Time to evaluate (HH:MM today or RFC3339); defaults to now
    #[arg(long)]
    at: Option<String>,
    /// Wake time override (HH:MM)
    #[arg(long)]
    wake: Option<String>,
    /// Output JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: CapacityArgs) -> CmdResult {
    let mut config = Config::load_or_default();
    if let Some(wake) = args.wake {
        config.set("bio.wake_time", &wake)?;
    }

    let now = now_minute();
    let target = match args.at {
        Some(at) => parse_when(&at, now.date())?,
        None => now,
    };
    let params = config.bio.params_for(target.date())?;
    let state = params.calculate_state(target);
    let report = CapacityReport::new(config.user.id.as_str(), "live", &state);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(
            &format!("Bio-State at {}", target.format("%H:%M")),
            &report,
        );
    }
    Ok(())
}
