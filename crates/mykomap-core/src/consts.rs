/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of channels in an RGB frame.
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Date key format used in artifact file names (e.g. `07.09.2025`).
pub const DATE_KEY_FORMAT: &str = "%d.%m.%Y";

/// Maximum number of raw frames retained in the archive.
pub const DEFAULT_MAX_RETAINED_FRAMES: usize = 4;

/// Map color of the "high" probability class.
pub const HIGH_PROB_RGB: [u8; 3] = [176, 221, 156];

/// Map color of the "very high" probability class.
pub const VERY_HIGH_PROB_RGB: [u8; 3] = [112, 189, 143];

/// Multiplicative per-channel tolerance for class color masks (3%).
pub const DEFAULT_RGB_TOLERANCE: f64 = 0.03;

/// Window weights, newest to oldest.
pub const DEFAULT_WINDOW_WEIGHTS: [f32; 4] = [0.4, 0.3, 0.2, 0.1];

/// A cell must be set in at least this many window frames to keep its weight.
pub const MIN_OVERLAP_COUNT: u8 = 2;

/// Lower bound on the per-pixel darkening factor.
pub const DEFAULT_DARKEN_FLOOR: f32 = 0.75;

/// Very-high surface weight above which a pixel is highlighted.
pub const DEFAULT_HIGHLIGHT_THRESHOLD: f32 = 0.7;

/// Color painted over stably very-high areas.
pub const HIGHLIGHT_COLOR: [u8; 3] = [0, 0, 255];

/// Highlight detection: red and green must be below this, blue above
/// `HIGHLIGHT_BLUE_MIN`.
pub const HIGHLIGHT_RG_MAX: u8 = 50;
pub const HIGHLIGHT_BLUE_MIN: u8 = 200;

/// Blue-dominant detection margin over both other channels.
pub const BLUE_DOMINANCE_MARGIN: i32 = 100;

/// Absolute per-channel tolerance for class-color detection.
pub const CLASS_COLOR_DETECTION_TOLERANCE: i32 = 30;

/// Channel mean below which a pixel counts as darkened.
pub const DARK_GRAY_THRESHOLD: f32 = 150.0;

/// Nominal minimum feature area in pixels.
pub const DEFAULT_MIN_FEATURE_AREA: usize = 100;

/// Absolute floor for the region area filter.
pub const MIN_REGION_AREA_FLOOR: usize = 10;

/// Region counts at or below this are not clustered.
pub const CLUSTER_SKIP_THRESHOLD: usize = 3;

/// DBSCAN neighborhood radius in pixels.
pub const DEFAULT_CLUSTER_EPS: f64 = 30.0;

/// DBSCAN minimum neighborhood size, including the point itself.
pub const DEFAULT_CLUSTER_MIN_SAMPLES: usize = 3;

/// Minimum number of positions in a closed polygon ring.
pub const MIN_RING_POSITIONS: usize = 4;

/// Geographic extent of the source map (Czech Republic, WGS84).
pub const DEFAULT_BOUNDS_NORTH: f64 = 51.0557;
pub const DEFAULT_BOUNDS_SOUTH: f64 = 48.5518;
pub const DEFAULT_BOUNDS_EAST: f64 = 18.8658;
pub const DEFAULT_BOUNDS_WEST: f64 = 12.0964;

pub const DEFAULT_COORDINATE_SYSTEM: &str = "WGS84";
pub const DEFAULT_SOURCE_LABEL: &str = "Czech Hydrometeorological Institute";

/// Probability label attached to every emitted feature.
pub const FEATURE_PROBABILITY_LABEL: &str = "very_high";

/// KML namespace for the visualization document.
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";
