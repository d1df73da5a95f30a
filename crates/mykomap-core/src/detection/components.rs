use std::collections::BTreeMap;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Integer pixel position; `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: u32,
    pub y: u32,
}

impl PixelPoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// One connected component of a binary mask.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelRegion {
    /// 1-based label in raster order of each region's first pixel.
    pub label: u32,
    /// Member pixels in raster (row-major) order.
    pub points: Vec<PixelPoint>,
}

impl PixelRegion {
    /// Number of pixels in the region.
    pub fn area(&self) -> usize {
        self.points.len()
    }

    /// Bounding box: (min_row, max_row, min_col, max_col).
    pub fn bbox(&self) -> Option<(u32, u32, u32, u32)> {
        let first = self.points.first()?;
        let init = (first.y, first.y, first.x, first.x);
        Some(self.points.iter().fold(init, |b, p| {
            (b.0.min(p.y), b.1.max(p.y), b.2.min(p.x), b.3.max(p.x))
        }))
    }
}

/// Label the connected components of a binary mask using two-pass labeling
/// with union-find. Uses 4-connectivity (left and upper neighbors), so
/// diagonally touching pixels belong to different regions.
///
/// Regions are returned in raster order of their first pixel.
pub fn label_regions(mask: &Array2<bool>) -> Vec<PixelRegion> {
    let (h, w) = mask.dim();
    if h == 0 || w == 0 {
        return Vec::new();
    }

    let mut labels = Array2::<u32>::zeros((h, w));
    let mut next_label: u32 = 1;
    // Union-find parent array. Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0; h * w / 2 + 2];

    // Pass 1: assign provisional labels.
    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let up = if row > 0 { labels[[row - 1, col]] } else { 0 };
            let left = if col > 0 { labels[[row, col - 1]] } else { 0 };

            labels[[row, col]] = match (up > 0, left > 0) {
                (false, false) => {
                    if next_label as usize >= parent.len() {
                        parent.resize(parent.len() * 2, 0);
                    }
                    parent[next_label as usize] = next_label;
                    next_label += 1;
                    next_label - 1
                }
                (true, false) => up,
                (false, true) => left,
                (true, true) => {
                    if up != left {
                        union(&mut parent, up, left);
                    }
                    up.min(left)
                }
            };
        }
    }

    // Flatten parent references.
    for i in 1..next_label as usize {
        parent[i] = find(&parent, i as u32);
    }

    // Pass 2: gather points per root. Roots are the smallest provisional
    // label of each component, which is the label of its first raster pixel.
    let mut by_root = BTreeMap::<u32, Vec<PixelPoint>>::new();
    for row in 0..h {
        for col in 0..w {
            let lbl = labels[[row, col]];
            if lbl == 0 {
                continue;
            }
            by_root
                .entry(parent[lbl as usize])
                .or_default()
                .push(PixelPoint::new(col as u32, row as u32));
        }
    }

    by_root
        .into_values()
        .enumerate()
        .map(|(i, points)| PixelRegion {
            label: i as u32 + 1,
            points,
        })
        .collect()
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // Merge larger root into smaller root so roots stay in raster order.
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}
