use anyhow::Result;
use clap::Args;
use mykomap_core::frame::format_date_key;
use mykomap_core::geography::{collection_metadata, parse_feature_collection};
use mykomap_core::io::{ArtifactKind, ArtifactPublisher, ArtifactStore, FrameArchive};

use super::{open_store, StoreArgs};

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let config = args.store.load_config()?;
    let store = open_store(&config)?;
    let archive = FrameArchive::new(config.storage.max_frames);
    let dates = archive.dates(&store)?;

    println!("Data dir:    {}", store.root().display());
    println!(
        "Frames:      {} of {} retained",
        dates.len(),
        archive.max_frames()
    );
    for date in &dates {
        println!("  {}", format_date_key(*date));
    }

    let publisher = ArtifactPublisher::recover(&store)?;
    let Some(current) = publisher.current() else {
        println!("Current:     none");
        return Ok(());
    };

    println!("Current:     {}", format_date_key(current.date));
    println!("  Composite: {}", current.composite);
    println!("  GeoJSON:   {}", current.features);
    println!("  KML:       {}", current.visualization);

    let text = store.read(ArtifactKind::FeatureCollection, &current.features)?;
    let collection = parse_feature_collection(&String::from_utf8_lossy(&text))?;
    println!("Features:    {}", collection.features.len());
    if let Some(created) = collection_metadata(&collection)
        .and_then(|m| m.get("processing_timestamp"))
        .and_then(|v| v.as_str())
    {
        println!("Processed:   {created}");
    }

    Ok(())
}
