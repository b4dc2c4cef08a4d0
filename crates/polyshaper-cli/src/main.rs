//! polyshaper - polynomial waveshaping from the command line.

mod commands;
mod preset;
mod settings;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polyshaper")]
#[command(author, version, about = "Polynomial waveshaper", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a mono WAV file through the waveshaper
    Process(commands::process::ProcessArgs),

    /// List the waveshaper parameters
    Params(commands::params::ParamsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Params(args) => commands::params::run(args),
    }
}
