pub mod config;
mod orchestrator;
mod types;

pub use config::{PipelineConfig, StorageConfig};
pub use orchestrator::{
    process_composite, process_frames, run_pipeline, run_pipeline_reported, ProcessedRun,
};
pub use types::{PipelineStage, ProgressReporter, RunOutcome, RunReport};
