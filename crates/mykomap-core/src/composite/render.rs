use ndarray::{Array2, Array3};
use tracing::{debug, info};

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{MykoError, Result};
use crate::frame::Frame;

use super::aggregate::{aggregate_surfaces, ProbabilitySurface};
use super::config::{AggregationConfig, RenderConfig};

/// Per-pixel darkening factor, clamped from below by `floor`.
pub fn darken_factor(total_weight: f32, floor: f32) -> f32 {
    (1.0 - total_weight).max(floor)
}

/// Darken the base frame by the summed surfaces and paint the highlight over
/// the stable cells of the highlight class.
pub fn render_composite(
    base: &Frame,
    surfaces: &[ProbabilitySurface],
    config: &RenderConfig,
) -> Result<Frame> {
    let dims = base.dims();
    let (h, w) = dims;

    let highlight = surfaces
        .iter()
        .find(|s| s.class.name == config.highlight_class)
        .ok_or_else(|| {
            MykoError::InvalidConfig(format!(
                "highlight class '{}' has no surface",
                config.highlight_class
            ))
        })?;

    let mut total = Array2::<f32>::zeros(dims);
    for surface in surfaces {
        if surface.weights.dim() != dims {
            return Err(MykoError::DimensionMismatch {
                expected: dims,
                actual: surface.weights.dim(),
            });
        }
        total += &surface.weights;
    }

    let mut out = Array3::<u8>::zeros((h, w, COLOR_CHANNEL_COUNT));
    let mut highlighted = 0usize;

    for row in 0..h {
        for col in 0..w {
            if highlight.weights[[row, col]] > config.highlight_threshold {
                for c in 0..COLOR_CHANNEL_COUNT {
                    out[[row, col, c]] = config.highlight_color[c];
                }
                highlighted += 1;
                continue;
            }
            let factor = darken_factor(total[[row, col]], config.darken_floor);
            for c in 0..COLOR_CHANNEL_COUNT {
                let v = base.data[[row, col, c]] as f32 * factor;
                out[[row, col, c]] = v.clamp(0.0, 255.0) as u8;
            }
        }
    }

    debug!(highlighted, "Rendered composite");
    Ok(Frame::new(out, base.date))
}

/// Aggregate the window and render the composite for the newest frame.
///
/// A single available frame is returned verbatim.
pub fn build_composite(
    frames: &[Frame],
    aggregation: &AggregationConfig,
    render: &RenderConfig,
) -> Result<Frame> {
    let base = frames.first().ok_or(MykoError::EmptySequence)?;
    if frames.len() == 1 {
        info!(date = %base.date, "Only one frame available, using it as the composite");
        return Ok(base.clone());
    }

    let surfaces = aggregate_surfaces(frames, aggregation)?;
    render_composite(base, &surfaces, render)
}
