use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use geojson::FeatureCollection;
use tracing::{info, warn};

use crate::composite::build_composite;
use crate::detection::{cluster_regions, default_strategies, extract_regions, StrategyKind};
use crate::error::{MykoError, Result};
use crate::frame::{format_date_key, Frame};
use crate::geography::{
    build_feature_collection_with_progress, to_geojson_string, to_kml_string, CoordinateMapper,
};
use crate::io::{crop_frame, encode_png, ArtifactPublisher, ArtifactStore, FrameArchive};

use super::config::PipelineConfig;
use super::types::{NoOpReporter, PipelineStage, ProgressReporter, RunOutcome, RunReport};

/// Everything computed for one date, ready to publish.
#[derive(Clone, Debug)]
pub struct ProcessedRun {
    pub date: NaiveDate,
    pub frames_used: usize,
    /// Cropped composite. Its size is the one used for coordinate mapping.
    pub composite: Frame,
    pub strategy: Option<StrategyKind>,
    pub matched_pixels: usize,
    pub regions: usize,
    pub clusters: usize,
    pub skipped_polygons: usize,
    pub collection: FeatureCollection,
    pub geojson: String,
    pub kml: String,
}

impl ProcessedRun {
    pub fn feature_count(&self) -> usize {
        self.collection.features.len()
    }
}

/// Run `f` as one stage, logging a failure with the stage and date.
fn run_stage<T>(
    stage: PipelineStage,
    date: NaiveDate,
    reporter: &dyn ProgressReporter,
    total_items: Option<usize>,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    reporter.begin_stage(stage, total_items);
    let result = f();
    reporter.finish_stage();
    if let Err(e) = &result {
        warn!(stage = %stage, date = %format_date_key(date), error = %e, "Pipeline stage failed");
    }
    result
}

/// Turn a rendered composite into cropped image, features and KML.
///
/// Pure computation: nothing is read from or written to storage.
pub fn process_composite(
    composite: &Frame,
    config: &PipelineConfig,
    processed_at: DateTime<Utc>,
    reporter: &dyn ProgressReporter,
) -> Result<ProcessedRun> {
    let date = composite.date;

    let cropped = run_stage(PipelineStage::Cropping, date, reporter, None, || {
        crop_frame(composite, &config.crop)
    })?;
    let (width, height) = (cropped.width() as u32, cropped.height() as u32);

    let mut mapper = CoordinateMapper::new(config.bounds);
    mapper.set_image_size(width, height);

    let extraction = run_stage(PipelineStage::Extracting, date, reporter, None, || {
        let strategies = default_strategies(&config.detection);
        Ok(extract_regions(
            &cropped.data,
            &strategies,
            config.detection.effective_min_area(),
        ))
    })?;
    let strategy = extraction.strategy;
    let matched_pixels = extraction.matched_pixels;
    let region_count = extraction.regions.len();

    let clusters = run_stage(
        PipelineStage::Clustering,
        date,
        reporter,
        Some(region_count),
        || Ok(cluster_regions(extraction.regions, &config.clustering)),
    )?;

    let build = run_stage(
        PipelineStage::Polygonizing,
        date,
        reporter,
        Some(clusters.len()),
        || {
            build_feature_collection_with_progress(
                &clusters,
                &mapper,
                date,
                &config.output,
                processed_at,
                |done| reporter.advance(done),
            )
        },
    )?;

    let (geojson, kml) = run_stage(PipelineStage::Serializing, date, reporter, None, || {
        let geojson = to_geojson_string(&build.collection)?;
        let kml = to_kml_string(&build.collection, &config.output);
        Ok((geojson, kml))
    })?;

    info!(
        date = %format_date_key(date),
        width,
        height,
        regions = region_count,
        clusters = clusters.len(),
        features = build.collection.features.len(),
        skipped = build.skipped,
        "Processed composite"
    );

    Ok(ProcessedRun {
        date,
        frames_used: 1,
        composite: cropped,
        strategy,
        matched_pixels,
        regions: region_count,
        clusters: clusters.len(),
        skipped_polygons: build.skipped,
        collection: build.collection,
        geojson,
        kml,
    })
}

/// Aggregate and render a newest-first window of frames, then process the
/// composite.
pub fn process_frames(
    frames: &[Frame],
    config: &PipelineConfig,
    processed_at: DateTime<Utc>,
    reporter: &dyn ProgressReporter,
) -> Result<ProcessedRun> {
    config.validate()?;
    let date = frames.first().ok_or(MykoError::EmptySequence)?.date;
    let window = &frames[..frames.len().min(config.aggregation.window_len())];

    let composite = run_stage(
        PipelineStage::Compositing,
        date,
        reporter,
        Some(window.len()),
        || build_composite(window, &config.aggregation, &config.render),
    )?;

    let mut run = process_composite(&composite, config, processed_at, reporter)?;
    run.frames_used = window.len();
    Ok(run)
}

/// Run the full pipeline against a store with a thread-safe progress reporter.
///
/// Loads the newest window of archived frames and publishes composite,
/// GeoJSON and KML for the newest date. If those artifacts already exist and
/// `force` is false, nothing is recomputed. Storage is only written after
/// every computation stage succeeded.
pub fn run_pipeline_reported(
    config: &PipelineConfig,
    store: &mut dyn ArtifactStore,
    publisher: &mut ArtifactPublisher,
    force: bool,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<RunOutcome> {
    config.validate()?;
    let archive = FrameArchive::new(config.storage.max_frames);

    let dates = archive.dates(store)?;
    let newest = *dates.first().ok_or(MykoError::EmptySequence)?;

    if !force && publisher.is_current(store, newest)? {
        if let Some(current) = publisher.current() {
            info!(date = %format_date_key(newest), "Artifacts already up to date");
            return Ok(RunOutcome::UpToDate(current.clone()));
        }
    }

    let window_len = config.aggregation.window_len();
    let frames = run_stage(
        PipelineStage::Loading,
        newest,
        reporter.as_ref(),
        Some(window_len.min(dates.len())),
        || {
            archive.load_window_with_progress(&*store, window_len, |done| reporter.advance(done))
        },
    )?;
    info!(
        date = %format_date_key(newest),
        frames = frames.len(),
        archived = dates.len(),
        "Loaded frame window"
    );

    let run = process_frames(&frames, config, Utc::now(), reporter.as_ref())?;

    let artifacts = run_stage(PipelineStage::Publishing, newest, reporter.as_ref(), Some(3), || {
        let png = encode_png(&run.composite)?;
        publisher.publish(
            store,
            run.date,
            &png,
            run.geojson.as_bytes(),
            run.kml.as_bytes(),
        )
    })?;

    Ok(RunOutcome::Published(RunReport {
        date: run.date,
        frames_used: run.frames_used,
        strategy: run.strategy,
        matched_pixels: run.matched_pixels,
        regions: run.regions,
        clusters: run.clusters,
        features: run.feature_count(),
        skipped_polygons: run.skipped_polygons,
        image_size: (run.composite.width() as u32, run.composite.height() as u32),
        artifacts,
    }))
}

/// Run the full pipeline without progress reporting.
pub fn run_pipeline(
    config: &PipelineConfig,
    store: &mut dyn ArtifactStore,
    publisher: &mut ArtifactPublisher,
    force: bool,
) -> Result<RunOutcome> {
    run_pipeline_reported(config, store, publisher, force, Arc::new(NoOpReporter))
}
