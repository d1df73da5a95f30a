use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;

use super::store::{ArtifactKind, ArtifactStore};

/// Kinds that have exactly one current artifact after a successful publish.
pub const PUBLISHED_KINDS: [ArtifactKind; 3] = [
    ArtifactKind::Composite,
    ArtifactKind::FeatureCollection,
    ArtifactKind::Visualization,
];

/// Names of the artifacts making up the current published run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CurrentArtifacts {
    pub date: NaiveDate,
    pub composite: String,
    pub features: String,
    pub visualization: String,
}

impl CurrentArtifacts {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            composite: ArtifactKind::Composite.file_name(date),
            features: ArtifactKind::FeatureCollection.file_name(date),
            visualization: ArtifactKind::Visualization.file_name(date),
        }
    }

    pub fn name(&self, kind: ArtifactKind) -> Option<&str> {
        match kind {
            ArtifactKind::Composite => Some(&self.composite),
            ArtifactKind::FeatureCollection => Some(&self.features),
            ArtifactKind::Visualization => Some(&self.visualization),
            ArtifactKind::Frame => None,
        }
    }
}

/// Owns the "one current artifact per kind" state.
///
/// New artifacts are written first; stale ones are removed only after every
/// write succeeded, so a failed publish leaves the previous set readable.
#[derive(Clone, Debug, Default)]
pub struct ArtifactPublisher {
    current: Option<CurrentArtifacts>,
}

impl ArtifactPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild state from what is in the store.
    ///
    /// The newest date with all three artifacts present becomes current.
    pub fn recover(store: &dyn ArtifactStore) -> Result<Self> {
        let mut dates: Vec<NaiveDate> = store
            .list(ArtifactKind::Composite)?
            .iter()
            .filter_map(|name| ArtifactKind::Composite.parse_date(name))
            .collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));

        for date in dates {
            let candidate = CurrentArtifacts::for_date(date);
            if Self::complete(store, &candidate)? {
                debug!(date = %date, "Recovered current artifacts");
                return Ok(Self {
                    current: Some(candidate),
                });
            }
        }
        Ok(Self::default())
    }

    pub fn current(&self) -> Option<&CurrentArtifacts> {
        self.current.as_ref()
    }

    /// True if the current artifacts are for `date` and all still exist.
    pub fn is_current(&self, store: &dyn ArtifactStore, date: NaiveDate) -> Result<bool> {
        match &self.current {
            Some(current) if current.date == date => Self::complete(store, current),
            _ => Ok(false),
        }
    }

    fn complete(store: &dyn ArtifactStore, artifacts: &CurrentArtifacts) -> Result<bool> {
        for kind in PUBLISHED_KINDS {
            if let Some(name) = artifacts.name(kind) {
                if !store.exists(kind, name)? {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Replace the current artifacts with those for `date`, then delete stale files.
    ///
    /// If any write fails, artifacts created by this call are removed again
    /// before the error is returned.
    pub fn publish(
        &mut self,
        store: &mut dyn ArtifactStore,
        date: NaiveDate,
        composite_png: &[u8],
        geojson: &[u8],
        kml: &[u8],
    ) -> Result<CurrentArtifacts> {
        let next = CurrentArtifacts::for_date(date);
        let writes = [
            (ArtifactKind::Composite, &next.composite, composite_png),
            (ArtifactKind::FeatureCollection, &next.features, geojson),
            (ArtifactKind::Visualization, &next.visualization, kml),
        ];

        let mut created: Vec<(ArtifactKind, &str)> = Vec::with_capacity(writes.len());
        for (kind, name, bytes) in writes {
            let result = store
                .exists(kind, name)
                .and_then(|existed| store.write(kind, name, bytes).map(|()| existed));
            match result {
                Ok(existed) => {
                    if !existed {
                        created.push((kind, name.as_str()));
                    }
                }
                Err(e) => {
                    warn!(date = %date, kind = %kind, error = %e, "Publish failed, rolling back");
                    rollback(store, &created);
                    return Err(e);
                }
            }
        }

        self.current = Some(next.clone());

        let removed = remove_stale(store, &next)?;
        info!(
            date = %date,
            composite = %next.composite,
            features = %next.features,
            visualization = %next.visualization,
            removed,
            "Published artifacts"
        );
        Ok(next)
    }
}

fn rollback(store: &mut dyn ArtifactStore, created: &[(ArtifactKind, &str)]) {
    for &(kind, name) in created {
        if let Err(e) = store.remove(kind, name) {
            warn!(kind = %kind, name = %name, error = %e, "Failed to roll back artifact");
        }
    }
}

fn remove_stale(store: &mut dyn ArtifactStore, keep: &CurrentArtifacts) -> Result<usize> {
    let mut removed = 0;
    for kind in PUBLISHED_KINDS {
        let keep_name = keep.name(kind);
        for name in store.list(kind)? {
            if Some(name.as_str()) == keep_name {
                continue;
            }
            match store.remove(kind, &name) {
                Ok(()) => {
                    debug!(kind = %kind, name = %name, "Removed superseded artifact");
                    removed += 1;
                }
                Err(e) => warn!(kind = %kind, name = %name, error = %e, "Failed to remove superseded artifact"),
            }
        }
    }
    Ok(removed)
}
