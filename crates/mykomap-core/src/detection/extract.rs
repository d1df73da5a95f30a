use ndarray::{Array2, Array3};
use tracing::{debug, info};

use crate::color::mask_count;

use super::components::{label_regions, PixelRegion};
use super::strategy::{DetectionStrategy, StrategyKind};

/// Result of running the detection chain over one image.
#[derive(Clone, Debug, Default)]
pub struct RegionExtraction {
    /// Strategy that produced the mask; `None` when nothing matched.
    pub strategy: Option<StrategyKind>,
    /// Number of pixels matched by that strategy.
    pub matched_pixels: usize,
    /// Components found before the area filter.
    pub components_found: usize,
    /// Components that passed the area filter.
    pub regions: Vec<PixelRegion>,
}

impl RegionExtraction {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Evaluate strategies in order and return the first mask with at least one
/// set pixel, with its pixel count.
pub fn select_mask(
    data: &Array3<u8>,
    strategies: &[DetectionStrategy],
) -> Option<(StrategyKind, Array2<bool>, usize)> {
    strategies.iter().find_map(|strategy| {
        let mask = strategy.mask(data);
        let count = mask_count(&mask);
        debug!(strategy = %strategy.kind, pixels = count, "Evaluated detection strategy");
        (count > 0).then_some((strategy.kind, mask, count))
    })
}

/// Detect candidate regions: pick a mask via the fallback chain, label its
/// connected components and drop those smaller than `min_area`.
pub fn extract_regions(
    data: &Array3<u8>,
    strategies: &[DetectionStrategy],
    min_area: usize,
) -> RegionExtraction {
    let Some((kind, mask, matched_pixels)) = select_mask(data, strategies) else {
        info!("No regions detected by any strategy");
        return RegionExtraction::default();
    };

    let components = label_regions(&mask);
    let components_found = components.len();
    let regions: Vec<PixelRegion> = components
        .into_iter()
        .filter(|region| {
            let keep = region.area() >= min_area;
            if !keep {
                debug!(label = region.label, area = region.area(), min_area, "Region rejected");
            }
            keep
        })
        .collect();

    info!(
        strategy = %kind,
        matched_pixels,
        components = components_found,
        accepted = regions.len(),
        "Extracted regions"
    );

    RegionExtraction {
        strategy: Some(kind),
        matched_pixels,
        components_found,
        regions,
    }
}
