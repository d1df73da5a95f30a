use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mykomap_core::geography::{parse_feature_collection, query_region};
use mykomap_core::io::{ArtifactKind, ArtifactPublisher, ArtifactStore};

use super::{open_store, StoreArgs};

#[derive(Args)]
pub struct QueryArgs {
    /// Longitude in degrees
    #[arg(allow_negative_numbers = true)]
    pub lon: f64,

    /// Latitude in degrees
    #[arg(allow_negative_numbers = true)]
    pub lat: f64,

    /// GeoJSON file to query (defaults to the current published collection)
    #[arg(long)]
    pub geojson: Option<PathBuf>,

    #[command(flatten)]
    pub store: StoreArgs,
}

pub fn run(args: &QueryArgs) -> Result<()> {
    let text = match args.geojson {
        Some(ref path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let config = args.store.load_config()?;
            let store = open_store(&config)?;
            let publisher = ArtifactPublisher::recover(&store)?;
            let current = publisher
                .current()
                .context("No published feature collection, run the pipeline first")?;
            let bytes = store.read(ArtifactKind::FeatureCollection, &current.features)?;
            String::from_utf8(bytes).context("Feature collection is not valid UTF-8")?
        }
    };

    let collection = parse_feature_collection(&text)?;
    let result = query_region(&collection, args.lon, args.lat);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
