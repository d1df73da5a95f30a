use ndarray::{Array2, Array3, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::consts::{HIGH_PROB_RGB, PARALLEL_PIXEL_THRESHOLD, VERY_HIGH_PROB_RGB};
use crate::frame::Rgb;

/// A probability class as it appears on the source map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityClass {
    /// Label used for surfaces, feature properties and KML style ids.
    pub name: String,
    /// Map color of the class.
    pub rgb: Rgb,
}

impl ProbabilityClass {
    pub fn new(name: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            name: name.into(),
            rgb,
        }
    }

    pub fn high() -> Self {
        Self::new("high", HIGH_PROB_RGB)
    }

    pub fn very_high() -> Self {
        Self::new("very_high", VERY_HIGH_PROB_RGB)
    }
}

/// Inclusive per-channel band `[target * (1 - tol), target * (1 + tol)]`.
///
/// The tolerance is multiplicative, so a zero target channel only matches 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorBand {
    pub lower: [f64; 3],
    pub upper: [f64; 3],
}

impl ColorBand {
    pub fn new(target: Rgb, tolerance: f64) -> Self {
        let mut lower = [0.0; 3];
        let mut upper = [0.0; 3];
        for c in 0..3 {
            lower[c] = target[c] as f64 * (1.0 - tolerance);
            upper[c] = target[c] as f64 * (1.0 + tolerance);
        }
        Self { lower, upper }
    }

    pub fn contains(&self, pixel: Rgb) -> bool {
        (0..3).all(|c| {
            let v = pixel[c] as f64;
            v >= self.lower[c] && v <= self.upper[c]
        })
    }
}

/// Binary mask of pixels whose color falls inside the tolerance band of `target`.
pub fn color_mask(data: &Array3<u8>, target: Rgb, tolerance: f64) -> Array2<bool> {
    let (h, w, _) = data.dim();
    let band = ColorBand::new(target, tolerance);

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        color_mask_parallel(data, &band, h, w)
    } else {
        color_mask_sequential(data, &band, h, w)
    }
}

fn color_mask_sequential(data: &Array3<u8>, band: &ColorBand, h: usize, w: usize) -> Array2<bool> {
    let mut mask = Array2::from_elem((h, w), false);
    for row in 0..h {
        for col in 0..w {
            let px = [data[[row, col, 0]], data[[row, col, 1]], data[[row, col, 2]]];
            mask[[row, col]] = band.contains(px);
        }
    }
    mask
}

/// Row-parallel mask evaluation using Rayon.
fn color_mask_parallel(data: &Array3<u8>, band: &ColorBand, h: usize, w: usize) -> Array2<bool> {
    let mut mask = Array2::from_elem((h, w), false);
    mask.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(row, mut out)| {
            for col in 0..w {
                out[col] =
                    band.contains([data[[row, col, 0]], data[[row, col, 1]], data[[row, col, 2]]]);
            }
        });
    mask
}

/// Number of set cells in a mask.
pub fn mask_count(mask: &Array2<bool>) -> usize {
    mask.iter().filter(|&&v| v).count()
}
