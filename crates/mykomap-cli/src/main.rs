mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mykomap", about = "Probability map to geographic regions")]
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
    /// Run the full pipeline on the archived frames
    Run(commands::pipeline::RunArgs),
    /// Add a dated frame to the archive
    Ingest(commands::ingest::IngestArgs),
    /// Show archived frames and current artifacts
    Info(commands::info::InfoArgs),
    /// Check whether a location falls inside a detected area
    Query(commands::query::QueryArgs),
    /// Convert between pixel and geographic coordinates
    Coords(commands::coords::CoordsArgs),
    /// Crop an image file by fixed insets
    Crop(commands::crop::CropArgs),
    /// Print or save the default pipeline config
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
        Commands::Run(args) => commands::pipeline::run(args),
        Commands::Ingest(args) => commands::ingest::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Query(args) => commands::query::run(args),
        Commands::Coords(args) => commands::coords::run(args),
        Commands::Crop(args) => commands::crop::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
