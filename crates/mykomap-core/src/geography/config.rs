use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_COORDINATE_SYSTEM, DEFAULT_SOURCE_LABEL, FEATURE_PROBABILITY_LABEL};

/// Line and fill styling for one probability class in the KML document.
///
/// Colors use KML `aabbggrr` hex notation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KmlStyle {
    pub class: String,
    pub line_color: String,
    pub fill_color: String,
    pub line_width: f32,
}

impl KmlStyle {
    pub fn style_id(&self) -> String {
        style_id(&self.class)
    }
}

/// Style id referenced by placemarks of the given class.
pub fn style_id(class: &str) -> String {
    format!("{class}_style")
}

/// Metadata and styling of the vector outputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_coordinate_system")]
    pub coordinate_system: String,
    /// Data provenance recorded in collection metadata.
    #[serde(default = "default_source")]
    pub source: String,
    /// Probability class label attached to every feature.
    #[serde(default = "default_probability_label")]
    pub probability_label: String,
    /// KML styles, emitted in this order.
    #[serde(default = "default_styles")]
    pub styles: Vec<KmlStyle>,
}

fn default_coordinate_system() -> String {
    DEFAULT_COORDINATE_SYSTEM.into()
}
fn default_source() -> String {
    DEFAULT_SOURCE_LABEL.into()
}
fn default_probability_label() -> String {
    FEATURE_PROBABILITY_LABEL.into()
}
fn default_styles() -> Vec<KmlStyle> {
    vec![
        KmlStyle {
            class: "high".into(),
            line_color: "ff9cddb0".into(),
            fill_color: "779cddb0".into(),
            line_width: 2.0,
        },
        KmlStyle {
            class: "very_high".into(),
            line_color: "ffff0000".into(),
            fill_color: "77ff0000".into(),
            line_width: 2.0,
        },
    ]
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            coordinate_system: default_coordinate_system(),
            source: default_source(),
            probability_label: default_probability_label(),
            styles: default_styles(),
        }
    }
}
