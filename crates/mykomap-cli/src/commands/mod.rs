pub mod config;
pub mod coords;
pub mod crop;
pub mod info;
pub mod ingest;
pub mod pipeline;
pub mod query;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use mykomap_core::io::FsStore;
use mykomap_core::pipeline::PipelineConfig;

/// Options shared by every command that touches the artifact store.
#[derive(Args, Clone)]
pub struct StoreArgs {
    /// Pipeline config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides storage.root from the config)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
}

impl StoreArgs {
    pub fn load_config(&self) -> Result<PipelineConfig> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(ref dir) = self.data_dir {
            config.storage.root = dir.clone();
        }
        Ok(config)
    }
}

/// Read a TOML config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let config: PipelineConfig = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&contents).context("Invalid pipeline config")?
        }
        None => PipelineConfig::default(),
    };
    config.validate().context("Invalid pipeline config")?;
    Ok(config)
}

pub fn open_store(config: &PipelineConfig) -> Result<FsStore> {
    FsStore::open(&config.storage.root).with_context(|| {
        format!(
            "Failed to open data directory {}",
            config.storage.root.display()
        )
    })
}
