use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::composite::{AggregationConfig, RenderConfig};
use crate::consts::DEFAULT_MAX_RETAINED_FRAMES;
use crate::detection::{ClusterConfig, DetectionConfig};
use crate::error::{MykoError, Result};
use crate::geography::{GeoBounds, OutputConfig};
use crate::io::CropInsets;

/// Full configuration for one pipeline run. Every section has defaults, so an
/// empty TOML document is a valid config.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub crop: CropInsets,
    #[serde(default)]
    pub bounds: GeoBounds,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub clustering: ClusterConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        self.storage.validate()?;
        self.aggregation.validate()?;
        self.render.validate()?;
        self.bounds.validate()?;

        if !self
            .aggregation
            .classes
            .iter()
            .any(|c| c.name == self.render.highlight_class)
        {
            return Err(MykoError::InvalidConfig(format!(
                "highlight class '{}' is not one of the aggregation classes",
                self.render.highlight_class
            )));
        }
        if self.clustering.eps <= 0.0 || !self.clustering.eps.is_finite() {
            return Err(MykoError::InvalidConfig(format!(
                "cluster eps must be positive, got {}",
                self.clustering.eps
            )));
        }
        if self.clustering.min_samples == 0 {
            return Err(MykoError::InvalidConfig(
                "cluster min_samples must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Where artifacts live and how many raw frames are retained.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_max_frames")]
    pub max_frames: usize,
}

fn default_root() -> PathBuf {
    PathBuf::from("data")
}

fn default_max_frames() -> usize {
    DEFAULT_MAX_RETAINED_FRAMES
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            max_frames: default_max_frames(),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_frames == 0 {
            return Err(MykoError::InvalidConfig(
                "storage.max_frames must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
