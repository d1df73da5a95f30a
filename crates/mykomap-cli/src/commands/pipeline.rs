use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use mykomap_core::io::ArtifactPublisher;
use mykomap_core::pipeline::{run_pipeline_reported, RunOutcome};

use super::{open_store, StoreArgs};
use crate::progress::BarReporter;
use crate::summary::{print_config_summary, print_run_summary};

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Recompute even if artifacts for the newest frame exist
    #[arg(long)]
    pub force: bool,

    /// Print the run outcome as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = args.store.load_config()?;
    let mut store = open_store(&config)?;
    let mut publisher =
        ArtifactPublisher::recover(&store).context("Failed to read current artifacts")?;

    if !args.json {
        print_config_summary(&config);
    }

    let reporter = Arc::new(BarReporter::new()?);
    let outcome = run_pipeline_reported(
        &config,
        &mut store,
        &mut publisher,
        args.force,
        reporter.clone(),
    );
    reporter.finish();
    let outcome = outcome.context("Pipeline run failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    print_run_summary(&outcome);
    if let RunOutcome::Published(_) = outcome {
        println!("Artifacts saved under {}", store.root().display());
    }
    Ok(())
}
