pub mod cluster;
pub mod components;
pub mod config;
pub mod extract;
pub mod strategy;

pub use cluster::{cluster_regions, Cluster};
pub use components::{label_regions, PixelPoint, PixelRegion};
pub use config::{ClusterConfig, DetectionConfig};
pub use extract::{extract_regions, RegionExtraction};
pub use strategy::{default_strategies, DetectionStrategy, StrategyKind};
