mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "idscan", about = "Frame editor and ID card QR autofill")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions and how it fits each frame
    Info(commands::info::InfoArgs),
    /// Pan, zoom and rotate an image into a frame and save the result
    Edit(commands::edit::EditArgs),
    /// Read the ID card QR code under the scan box and fill the form
    Scan(commands::scan::ScanArgs),
    /// Parse a raw ID card QR payload
    Parse(commands::parse::ParseArgs),
    /// Print or save the default editor config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Edit(args) => commands::edit::run(args),
        Commands::Scan(args) => commands::scan::run(args),
        Commands::Parse(args) => commands::parse::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
