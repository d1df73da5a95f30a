use chrono::NaiveDate;
use serde::Serialize;

use crate::detection::StrategyKind;
use crate::io::CurrentArtifacts;

/// Pipeline processing stage, used for progress reporting and failure logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Loading,
    Compositing,
    Cropping,
    Extracting,
    Clustering,
    Polygonizing,
    Serializing,
    Publishing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading frames"),
            Self::Compositing => write!(f, "Building composite"),
            Self::Cropping => write!(f, "Cropping"),
            Self::Extracting => write!(f, "Extracting regions"),
            Self::Clustering => write!(f, "Clustering regions"),
            Self::Polygonizing => write!(f, "Building polygons"),
            Self::Serializing => write!(f, "Serializing outputs"),
            Self::Publishing => write!(f, "Publishing artifacts"),
        }
    }
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// work items in this stage (e.g., frame count), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_pipeline` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Counts and artifact names from one published run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunReport {
    pub date: NaiveDate,
    pub frames_used: usize,
    /// Detection strategy that matched, if any.
    #[serde(serialize_with = "serialize_strategy")]
    pub strategy: Option<StrategyKind>,
    pub matched_pixels: usize,
    pub regions: usize,
    pub clusters: usize,
    pub features: usize,
    pub skipped_polygons: usize,
    /// (width, height) of the cropped composite.
    pub image_size: (u32, u32),
    pub artifacts: CurrentArtifacts,
}

fn serialize_strategy<S>(
    strategy: &Option<StrategyKind>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match strategy {
        Some(kind) => serializer.serialize_some(&kind.to_string()),
        None => serializer.serialize_none(),
    }
}

/// What a pipeline invocation did.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// New artifacts were computed and published.
    Published(RunReport),
    /// Artifacts for the newest frame already exist; nothing was recomputed.
    UpToDate(CurrentArtifacts),
}

impl RunOutcome {
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Published(report) => report.date,
            Self::UpToDate(current) => current.date,
        }
    }

    pub fn artifacts(&self) -> &CurrentArtifacts {
        match self {
            Self::Published(report) => &report.artifacts,
            Self::UpToDate(current) => current,
        }
    }
}
