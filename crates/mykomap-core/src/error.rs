use thiserror::Error;

#[derive(Error, Debug)]
pub enum MykoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("Image dimensions unknown: set the cropped image size before converting coordinates")]
    UnboundedState,

    #[error("Degenerate polygon from {points} points: {reason}")]
    DegeneratePolygon { points: usize, reason: String },

    #[error(
        "Invalid crop insets (left {left}, right {right}, top {top}, bottom {bottom}) \
         for {width}x{height} image"
    )]
    InvalidCropGeometry {
        left: u32,
        right: u32,
        top: u32,
        bottom: u32,
        width: u32,
        height: u32,
    },

    #[error("Frame dimensions {actual:?} do not match base frame {expected:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Invalid date key: {0}")]
    InvalidDate(String),

    #[error("Invalid artifact name: {0}")]
    InvalidArtifactName(String),

    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Empty frame sequence")]
    EmptySequence,

    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

pub type Result<T> = std::result::Result<T, MykoError>;
