use serde::{Deserialize, Serialize};

use crate::color::ProbabilityClass;
use crate::consts::{
    DEFAULT_DARKEN_FLOOR, DEFAULT_HIGHLIGHT_THRESHOLD, DEFAULT_RGB_TOLERANCE,
    DEFAULT_WINDOW_WEIGHTS, HIGHLIGHT_COLOR,
};
use crate::error::{MykoError, Result};
use crate::frame::Rgb;

/// Sliding-window aggregation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Probability classes to track, in surface order.
    #[serde(default = "default_classes")]
    pub classes: Vec<ProbabilityClass>,
    /// Multiplicative color tolerance for class masks.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Per-frame weights, newest first. The window length is `weights.len()`.
    #[serde(default = "default_weights")]
    pub weights: Vec<f32>,
}

fn default_classes() -> Vec<ProbabilityClass> {
    vec![ProbabilityClass::high(), ProbabilityClass::very_high()]
}
fn default_tolerance() -> f64 {
    DEFAULT_RGB_TOLERANCE
}
fn default_weights() -> Vec<f32> {
    DEFAULT_WINDOW_WEIGHTS.to_vec()
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            classes: default_classes(),
            tolerance: DEFAULT_RGB_TOLERANCE,
            weights: default_weights(),
        }
    }
}

impl AggregationConfig {
    pub fn window_len(&self) -> usize {
        self.weights.len()
    }

    pub fn validate(&self) -> Result<()> {
        if self.weights.is_empty() {
            return Err(MykoError::InvalidConfig("window weights are empty".into()));
        }
        if let Some(w) = self.weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(MykoError::InvalidConfig(format!(
                "window weight {w} must be finite and non-negative"
            )));
        }
        if !(0.0..1.0).contains(&self.tolerance) {
            return Err(MykoError::InvalidConfig(format!(
                "color tolerance {} must be in [0, 1)",
                self.tolerance
            )));
        }
        if self.classes.is_empty() {
            return Err(MykoError::InvalidConfig("no probability classes".into()));
        }
        Ok(())
    }
}

/// Composite rendering parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Lower bound on the darkening factor.
    #[serde(default = "default_darken_floor")]
    pub darken_floor: f32,
    /// Class whose surface drives the highlight.
    #[serde(default = "default_highlight_class")]
    pub highlight_class: String,
    /// Surface weight above which a pixel is highlighted.
    #[serde(default = "default_highlight_threshold")]
    pub highlight_threshold: f32,
    #[serde(default = "default_highlight_color")]
    pub highlight_color: Rgb,
}

fn default_darken_floor() -> f32 {
    DEFAULT_DARKEN_FLOOR
}
fn default_highlight_class() -> String {
    ProbabilityClass::very_high().name
}
fn default_highlight_threshold() -> f32 {
    DEFAULT_HIGHLIGHT_THRESHOLD
}
fn default_highlight_color() -> Rgb {
    HIGHLIGHT_COLOR
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            darken_floor: DEFAULT_DARKEN_FLOOR,
            highlight_class: default_highlight_class(),
            highlight_threshold: DEFAULT_HIGHLIGHT_THRESHOLD,
            highlight_color: HIGHLIGHT_COLOR,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.darken_floor) {
            return Err(MykoError::InvalidConfig(format!(
                "darken floor {} must be in [0, 1]",
                self.darken_floor
            )));
        }
        if !self.highlight_threshold.is_finite() {
            return Err(MykoError::InvalidConfig(format!(
                "highlight threshold {} must be finite",
                self.highlight_threshold
            )));
        }
        Ok(())
    }
}
