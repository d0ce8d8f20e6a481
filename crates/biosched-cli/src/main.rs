use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "biosched", version, about = "Capacity-aware task planner")]
struct Cli {
    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Live capacity from the configured biological parameters
    Capacity(commands::capacity::CapacityArgs),
    /// Latest recorded capacity for a user
    Status(commands::status::StatusArgs),
    /// Plan tasks onto the next 12 hours
    Plan(commands::plan::PlanArgs),
    /// Record a day of hourly bio-states
    Simulate(commands::simulate::SimulateArgs),
    /// JSON request on stdin, JSON schedule on stdout
    Tool,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Capacity(args) => commands::capacity::run(args),
        Commands::Status(args) => commands::status::run(args),
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Tool => commands::tool::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
