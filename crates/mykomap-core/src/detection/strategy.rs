use ndarray::{Array2, Array3};

use crate::consts::{
    BLUE_DOMINANCE_MARGIN, CLASS_COLOR_DETECTION_TOLERANCE, DARK_GRAY_THRESHOLD,
    HIGHLIGHT_BLUE_MIN, HIGHLIGHT_RG_MAX,
};
use crate::frame::{pixel_at, Rgb};

use super::config::DetectionConfig;

/// Which pixel heuristic produced the detection mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Pixels painted with the highlight color.
    Highlight,
    /// Pixels whose blue channel clearly dominates.
    BlueDominant,
    /// Pixels close to one of the class colors.
    ClassColor,
    /// Pixels darker than a fixed gray level.
    Dark,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Highlight => write!(f, "highlight"),
            Self::BlueDominant => write!(f, "blue_dominant"),
            Self::ClassColor => write!(f, "class_color"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

pub type PixelPredicate = Box<dyn Fn(Rgb) -> bool + Send + Sync>;

/// A named per-pixel predicate that can be turned into a mask.
pub struct DetectionStrategy {
    pub kind: StrategyKind,
    predicate: PixelPredicate,
}

impl DetectionStrategy {
    pub fn new(kind: StrategyKind, predicate: PixelPredicate) -> Self {
        Self { kind, predicate }
    }

    pub fn matches(&self, pixel: Rgb) -> bool {
        (self.predicate)(pixel)
    }

    pub fn mask(&self, data: &Array3<u8>) -> Array2<bool> {
        let (h, w, _) = data.dim();
        Array2::from_shape_fn((h, w), |(row, col)| self.matches(pixel_at(data, row, col)))
    }
}

impl std::fmt::Debug for DetectionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectionStrategy")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

pub fn highlight_strategy() -> DetectionStrategy {
    DetectionStrategy::new(
        StrategyKind::Highlight,
        Box::new(|[r, g, b]: Rgb| {
            r < HIGHLIGHT_RG_MAX && g < HIGHLIGHT_RG_MAX && b > HIGHLIGHT_BLUE_MIN
        }),
    )
}

pub fn blue_dominant_strategy() -> DetectionStrategy {
    DetectionStrategy::new(
        StrategyKind::BlueDominant,
        Box::new(|[r, g, b]: Rgb| {
            let (r, g, b) = (r as i32, g as i32, b as i32);
            b > r + BLUE_DOMINANCE_MARGIN && b > g + BLUE_DOMINANCE_MARGIN
        }),
    )
}

pub fn class_color_strategy(colors: Vec<Rgb>) -> DetectionStrategy {
    DetectionStrategy::new(
        StrategyKind::ClassColor,
        Box::new(move |px: Rgb| {
            colors.iter().any(|target| {
                (0..3).all(|c| {
                    (px[c] as i32 - target[c] as i32).abs() <= CLASS_COLOR_DETECTION_TOLERANCE
                })
            })
        }),
    )
}

pub fn dark_strategy() -> DetectionStrategy {
    DetectionStrategy::new(
        StrategyKind::Dark,
        Box::new(|[r, g, b]: Rgb| (r as f32 + g as f32 + b as f32) / 3.0 < DARK_GRAY_THRESHOLD),
    )
}

/// The fallback chain in priority order: highlight, blue-dominant,
/// class colors, darkness.
pub fn default_strategies(config: &DetectionConfig) -> Vec<DetectionStrategy> {
    vec![
        highlight_strategy(),
        blue_dominant_strategy(),
        class_color_strategy(config.class_colors.clone()),
        dark_strategy(),
    ]
}
