use anyhow::Result;
use clap::{Args, Subcommand};
use mykomap_core::geography::CoordinateMapper;
use mykomap_core::io::{decode_frame, ArtifactKind, ArtifactPublisher, ArtifactStore};

use super::{open_store, StoreArgs};

#[derive(Args)]
pub struct CoordsArgs {
    #[command(subcommand)]
    pub direction: Direction,

    /// Image width in pixels (defaults to the current composite)
    #[arg(long, global = true)]
    pub width: Option<u32>,

    /// Image height in pixels (defaults to the current composite)
    #[arg(long, global = true)]
    pub height: Option<u32>,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Subcommand)]
pub enum Direction {
    /// Pixel (x, y) to longitude/latitude
    ToGeo { x: f64, y: f64 },
    /// Longitude/latitude to pixel (x, y)
    ToPixel {
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        #[arg(allow_negative_numbers = true)]
        lat: f64,
    },
}

pub fn run(args: &CoordsArgs) -> Result<()> {
    let config = args.store.load_config()?;
    let mut mapper = CoordinateMapper::new(config.bounds);

    match (args.width, args.height) {
        (Some(w), Some(h)) => mapper.set_image_size(w, h),
        _ => {
            let store = open_store(&config)?;
            let publisher = ArtifactPublisher::recover(&store)?;
            if let Some(current) = publisher.current() {
                let bytes = store.read(ArtifactKind::Composite, &current.composite)?;
                let frame = decode_frame(&bytes, current.date)?;
                mapper.set_image_size(frame.width() as u32, frame.height() as u32);
            }
        }
    }

    match args.direction {
        Direction::ToGeo { x, y } => {
            let (lon, lat) = mapper.pixel_to_geo(x, y)?;
            println!("{lon:.6}, {lat:.6}");
        }
        Direction::ToPixel { lon, lat } => {
            let (x, y) = mapper.geo_to_pixel(lon, lat)?;
            println!("{x}, {y}");
        }
    }

    Ok(())
}
