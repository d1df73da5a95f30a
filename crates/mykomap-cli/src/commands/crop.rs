use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mykomap_core::io::{crop_image_file, CropInsets};

use super::StoreArgs;

#[derive(Args)]
pub struct CropArgs {
    /// Image to crop
    pub file: PathBuf,

    /// Output PNG (defaults to overwriting the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Left inset in pixels (defaults to crop.left from the config)
    #[arg(long)]
    pub left: Option<u32>,

    /// Right inset in pixels
    #[arg(long)]
    pub right: Option<u32>,

    /// Top inset in pixels
    #[arg(long)]
    pub top: Option<u32>,

    /// Bottom inset in pixels
    #[arg(long)]
    pub bottom: Option<u32>,

    #[command(flatten)]
    pub store: StoreArgs,
}

pub fn run(args: &CropArgs) -> Result<()> {
    let config = args.store.load_config()?;
    let insets = CropInsets {
        left: args.left.unwrap_or(config.crop.left),
        right: args.right.unwrap_or(config.crop.right),
        top: args.top.unwrap_or(config.crop.top),
        bottom: args.bottom.unwrap_or(config.crop.bottom),
    };

    let output = args.output.clone().unwrap_or_else(|| args.file.clone());
    let (w, h) = crop_image_file(&args.file, &output, &insets)
        .with_context(|| format!("Failed to crop {}", args.file.display()))?;

    println!("Cropped to {w}x{h}, saved to {}", output.display());
    Ok(())
}
