mod commands;
mod executor;
mod manaba;
mod observer;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::sync::Mode;

#[derive(Parser)]
#[command(name = "manaba-sync")]
#[command(about = "Keep manaba assignment deadlines in your Google Calendar")]
struct Cli {
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan manaba and update the calendar
    Sync,
    /// Show what sync would do without writing
    Plan {
        /// Print the actions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print open and submitted assignments found on manaba
    Scan,
    /// Show config paths and settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Sync => commands::sync::run(Mode::Apply).await,
        Commands::Plan { json } => commands::sync::run(Mode::Plan { json }).await,
        Commands::Scan => commands::scan::run().await,
        Commands::Config => commands::config::run(),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
