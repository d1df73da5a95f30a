use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mykomap_core::frame::{format_date_key, parse_date_key};
use mykomap_core::io::{load_frame, FrameArchive, IngestOutcome};

use super::{open_store, StoreArgs};

#[derive(Args)]
pub struct IngestArgs {
    /// Decoded map image (PNG, JPEG, ...)
    pub file: PathBuf,

    /// Publication date of the map (dd.mm.yyyy)
    #[arg(long)]
    pub date: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

pub fn run(args: &IngestArgs) -> Result<()> {
    let config = args.store.load_config()?;
    let date = parse_date_key(&args.date)?;
    let frame = load_frame(&args.file, date)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let mut store = open_store(&config)?;
    let archive = FrameArchive::new(config.storage.max_frames);

    match archive.ingest(&mut store, &frame)? {
        IngestOutcome::AlreadyPresent => {
            println!("Frame for {} already archived, skipped", frame.date_key());
        }
        IngestOutcome::Stored { evicted } => {
            println!(
                "Archived {} ({}x{})",
                frame.date_key(),
                frame.width(),
                frame.height()
            );
            for date in evicted {
                println!("  evicted {}", format_date_key(date));
            }
        }
    }

    Ok(())
}
