//! Hourly bio-state ingestion into the telemetry database.

use clap::Args;

use biosched_core::{ingest_states, Config};

use super::{now_minute, open_store, CmdResult};

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of hourly samples, starting at the wake time
    #[arg(long, default_value_t = 24)]
    hours: u32,
    /// User id (defaults to user.id from config)
    #[arg(long)]
    user: Option<String>,
    /// Wake time override (HH:MM)
    #[arg(long)]
    wake: Option<String>,
}

pub fn run(args: SimulateArgs) -> CmdResult {
    let mut config = Config::load_or_default();
    if let Some(wake) = args.wake {
        config.set("bio.wake_time", &wake)?;
    }
    let user = args.user.unwrap_or_else(|| config.user.id.clone());

    let params = config.bio.params_for(now_minute().date())?;
    let store = open_store(&config)?;

    println!("Ingesting {} hour(s) of bio-state data for {user}", args.hours);
    let report = ingest_states(&store, &user, &params, params.wake_time, args.hours);

    for sample in &report.saved {
        println!(
            "[SAVED] {} | Capacity: {:.2}",
            sample.timestamp.format("%H:%M"),
            sample.state.total_capacity
        );
    }
    println!(
        "Ingestion complete: {} saved, {} failed",
        report.saved.len(),
        report.failed
    );
    Ok(())
}
