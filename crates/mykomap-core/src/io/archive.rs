use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::consts::DEFAULT_MAX_RETAINED_FRAMES;
use crate::error::{MykoError, Result};
use crate::frame::Frame;

use super::image_io::{decode_frame, encode_png};
use super::store::{ArtifactKind, ArtifactStore};

/// Result of adding a frame to the archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Frame was written; older frames beyond the retention window were evicted.
    Stored { evicted: Vec<NaiveDate> },
    /// A frame for this date already exists and was left untouched.
    AlreadyPresent,
}

/// Bounded archive of dated source frames, one per date.
#[derive(Clone, Copy, Debug)]
pub struct FrameArchive {
    max_frames: usize,
}

impl Default for FrameArchive {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETAINED_FRAMES)
    }
}

impl FrameArchive {
    pub fn new(max_frames: usize) -> Self {
        Self {
            max_frames: max_frames.max(1),
        }
    }

    pub fn max_frames(&self) -> usize {
        self.max_frames
    }

    /// Dates of archived frames, newest first.
    pub fn dates(&self, store: &dyn ArtifactStore) -> Result<Vec<NaiveDate>> {
        let mut dates: Vec<NaiveDate> = store
            .list(ArtifactKind::Frame)?
            .iter()
            .filter_map(|name| {
                let date = ArtifactKind::Frame.parse_date(name);
                if date.is_none() {
                    warn!(name = %name, "Ignoring frame artifact with unparsable name");
                }
                date
            })
            .collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.dedup();
        Ok(dates)
    }

    /// Store a frame unless its date is already archived, then enforce retention.
    pub fn ingest(&self, store: &mut dyn ArtifactStore, frame: &Frame) -> Result<IngestOutcome> {
        let name = ArtifactKind::Frame.file_name(frame.date);
        if store.exists(ArtifactKind::Frame, &name)? {
            debug!(date = %frame.date, "Frame already archived");
            return Ok(IngestOutcome::AlreadyPresent);
        }

        let png = encode_png(frame)?;
        store.write(ArtifactKind::Frame, &name, &png)?;
        info!(
            date = %frame.date,
            width = frame.width(),
            height = frame.height(),
            "Archived frame"
        );

        let evicted = self.enforce_retention(store)?;
        Ok(IngestOutcome::Stored { evicted })
    }

    /// Remove the oldest frames by date until at most `max_frames` remain.
    pub fn enforce_retention(&self, store: &mut dyn ArtifactStore) -> Result<Vec<NaiveDate>> {
        let dates = self.dates(store)?;
        let mut evicted = Vec::new();
        for &date in dates.iter().skip(self.max_frames) {
            store.remove(ArtifactKind::Frame, &ArtifactKind::Frame.file_name(date))?;
            info!(date = %date, "Evicted frame beyond retention window");
            evicted.push(date);
        }
        Ok(evicted)
    }

    pub fn load(&self, store: &dyn ArtifactStore, date: NaiveDate) -> Result<Frame> {
        let bytes = store.read(ArtifactKind::Frame, &ArtifactKind::Frame.file_name(date))?;
        decode_frame(&bytes, date)
    }

    /// Load up to `count` frames, newest first.
    pub fn load_window(&self, store: &dyn ArtifactStore, count: usize) -> Result<Vec<Frame>> {
        self.load_window_with_progress(store, count, |_| {})
    }

    /// Like [`FrameArchive::load_window`], calling `on_frame` with the number
    /// of frames loaded so far.
    pub fn load_window_with_progress(
        &self,
        store: &dyn ArtifactStore,
        count: usize,
        mut on_frame: impl FnMut(usize),
    ) -> Result<Vec<Frame>> {
        let dates = self.dates(store)?;
        if dates.is_empty() {
            return Err(MykoError::EmptySequence);
        }
        let mut frames = Vec::with_capacity(count.max(1));
        for (i, date) in dates.into_iter().take(count.max(1)).enumerate() {
            frames.push(self.load(store, date)?);
            on_frame(i + 1);
        }
        Ok(frames)
    }
}
