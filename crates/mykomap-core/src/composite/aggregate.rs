use ndarray::{Array2, Zip};
use tracing::debug;

use crate::color::{color_mask, ProbabilityClass};
use crate::consts::MIN_OVERLAP_COUNT;
use crate::error::{MykoError, Result};
use crate::frame::Frame;

use super::config::AggregationConfig;

/// Weighted, overlap-gated accumulation of one class over the window.
#[derive(Clone, Debug)]
pub struct ProbabilitySurface {
    pub class: ProbabilityClass,
    /// Accumulated weight per pixel, shape = (height, width).
    pub weights: Array2<f32>,
    /// Number of window frames in which the class mask was set.
    pub occurrences: Array2<u8>,
}

impl ProbabilitySurface {
    fn zeros(class: ProbabilityClass, dims: (usize, usize)) -> Self {
        Self {
            class,
            weights: Array2::zeros(dims),
            occurrences: Array2::zeros(dims),
        }
    }

    fn accumulate(&mut self, mask: &Array2<bool>, weight: f32) {
        Zip::from(&mut self.weights)
            .and(&mut self.occurrences)
            .and(mask)
            .for_each(|w, n, &m| {
                if m {
                    *w += weight;
                    *n = n.saturating_add(1);
                }
            });
    }

    /// Zero every cell seen in fewer than `MIN_OVERLAP_COUNT` frames.
    fn apply_overlap_gate(&mut self) {
        Zip::from(&mut self.weights)
            .and(&self.occurrences)
            .for_each(|w, &n| {
                if n < MIN_OVERLAP_COUNT {
                    *w = 0.0;
                }
            });
    }
}

/// Build one probability surface per configured class.
///
/// `frames` must be ordered newest first. Only the first `weights.len()`
/// frames contribute; a shorter history simply leaves trailing weights unused.
pub fn aggregate_surfaces(
    frames: &[Frame],
    config: &AggregationConfig,
) -> Result<Vec<ProbabilitySurface>> {
    config.validate()?;
    let base = frames.first().ok_or(MykoError::EmptySequence)?;
    let dims = base.dims();

    let mut surfaces: Vec<ProbabilitySurface> = config
        .classes
        .iter()
        .map(|class| ProbabilitySurface::zeros(class.clone(), dims))
        .collect();

    for (frame, &weight) in frames.iter().zip(config.weights.iter()) {
        if frame.dims() != dims {
            return Err(MykoError::DimensionMismatch {
                expected: dims,
                actual: frame.dims(),
            });
        }
        for surface in surfaces.iter_mut() {
            let mask = color_mask(&frame.data, surface.class.rgb, config.tolerance);
            surface.accumulate(&mask, weight);
        }
        debug!(date = %frame.date, weight, "Accumulated frame into surfaces");
    }

    for surface in surfaces.iter_mut() {
        surface.apply_overlap_gate();
    }

    Ok(surfaces)
}
