use serde::{Deserialize, Serialize};

use crate::consts::{
    CLUSTER_SKIP_THRESHOLD, DEFAULT_CLUSTER_EPS, DEFAULT_CLUSTER_MIN_SAMPLES,
    DEFAULT_MIN_FEATURE_AREA, HIGH_PROB_RGB, MIN_REGION_AREA_FLOOR, VERY_HIGH_PROB_RGB,
};
use crate::frame::Rgb;

/// Configuration for region detection in a rendered composite.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Nominal minimum feature area in pixels.
    #[serde(default = "default_min_feature_area")]
    pub min_feature_area: usize,
    /// Explicit region area filter. When unset, derived from `min_feature_area`.
    #[serde(default)]
    pub min_region_area: Option<usize>,
    /// Class colors matched by the class-color fallback strategy.
    #[serde(default = "default_class_colors")]
    pub class_colors: Vec<Rgb>,
}

fn default_min_feature_area() -> usize {
    DEFAULT_MIN_FEATURE_AREA
}
fn default_class_colors() -> Vec<Rgb> {
    vec![HIGH_PROB_RGB, VERY_HIGH_PROB_RGB]
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_feature_area: DEFAULT_MIN_FEATURE_AREA,
            min_region_area: None,
            class_colors: default_class_colors(),
        }
    }
}

impl DetectionConfig {
    /// Regions smaller than this are discarded.
    pub fn effective_min_area(&self) -> usize {
        self.min_region_area
            .unwrap_or_else(|| (self.min_feature_area / 10).max(MIN_REGION_AREA_FLOOR))
    }
}

/// Density-based clustering parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Neighborhood radius in pixels (inclusive).
    #[serde(default = "default_eps")]
    pub eps: f64,
    /// Minimum neighborhood size for a core point, including the point itself.
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,
    /// Region counts at or below this bypass clustering.
    #[serde(default = "default_skip_threshold")]
    pub skip_threshold: usize,
}

fn default_eps() -> f64 {
    DEFAULT_CLUSTER_EPS
}
fn default_min_samples() -> usize {
    DEFAULT_CLUSTER_MIN_SAMPLES
}
fn default_skip_threshold() -> usize {
    CLUSTER_SKIP_THRESHOLD
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            eps: DEFAULT_CLUSTER_EPS,
            min_samples: DEFAULT_CLUSTER_MIN_SAMPLES,
            skip_threshold: CLUSTER_SKIP_THRESHOLD,
        }
    }
}
