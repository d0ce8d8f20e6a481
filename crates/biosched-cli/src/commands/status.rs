//! Latest recorded bio-state.

use clap::Args;

use biosched_core::{CapacityReport, Config, TelemetryStore};

use super::{open_store, print_report, CmdResult};

#[derive(Args)]
pub struct StatusArgs {
    /// User id (defaults to user.id from config)
    #[arg(long)]
    user: Option<String>,
    /// Output JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: StatusArgs) -> CmdResult {
    let config = Config::load_or_default();
    let user = args.user.unwrap_or_else(|| config.user.id.clone());

    let store = open_store(&config)?;
    let state = store
        .load_latest(&user)?
        .ok_or_else(|| format!("biological signal lost: no telemetry recorded for '{user}'"))?;

    let report = CapacityReport::new(user.as_str(), "connected", &state);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report("Current Bio-State", &report);
    }
    Ok(())
}
