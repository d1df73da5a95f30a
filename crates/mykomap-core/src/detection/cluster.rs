use rstar::primitives::GeomWithData;
use rstar::RTree;
use tracing::{debug, info};

use super::components::{PixelPoint, PixelRegion};
use super::config::ClusterConfig;

/// A spatially coherent group of pixels, built from one or more regions.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    /// 0-based cluster index in output order.
    pub id: usize,
    pub points: Vec<PixelPoint>,
    /// Labels of the regions that contributed points, ascending.
    pub source_regions: Vec<u32>,
}

impl Cluster {
    pub fn from_region(id: usize, region: PixelRegion) -> Self {
        Self {
            id,
            points: region.points,
            source_regions: vec![region.label],
        }
    }

    /// Number of pixels in the cluster.
    pub fn area(&self) -> usize {
        self.points.len()
    }
}

type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// Merge nearby regions with DBSCAN.
///
/// With `skip_threshold` or fewer regions, each region is passed through as
/// its own cluster. Otherwise all pixels are pooled and clustered; noise
/// points are dropped and clusters come out in label order.
pub fn cluster_regions(regions: Vec<PixelRegion>, config: &ClusterConfig) -> Vec<Cluster> {
    if regions.is_empty() {
        debug!("No regions to cluster");
        return Vec::new();
    }

    if regions.len() <= config.skip_threshold {
        info!(regions = regions.len(), "Too few regions to cluster, keeping them as-is");
        return regions
            .into_iter()
            .enumerate()
            .map(|(i, region)| Cluster::from_region(i, region))
            .collect();
    }

    let mut points = Vec::new();
    let mut origins = Vec::new();
    for region in &regions {
        for p in &region.points {
            points.push(*p);
            origins.push(region.label);
        }
    }

    let labels = dbscan(&points, config.eps, config.min_samples);
    let n_clusters = labels.iter().flatten().max().map_or(0, |&m| m + 1);
    let noise = labels.iter().filter(|l| l.is_none()).count();

    let mut clusters: Vec<Cluster> = (0..n_clusters)
        .map(|id| Cluster {
            id,
            points: Vec::new(),
            source_regions: Vec::new(),
        })
        .collect();

    for ((point, origin), label) in points.iter().zip(&origins).zip(&labels) {
        if let Some(id) = label {
            let cluster = &mut clusters[*id];
            cluster.points.push(*point);
            if !cluster.source_regions.contains(origin) {
                cluster.source_regions.push(*origin);
            }
        }
    }
    for cluster in clusters.iter_mut() {
        cluster.source_regions.sort_unstable();
    }

    info!(
        points = points.len(),
        regions = regions.len(),
        clusters = clusters.len(),
        noise,
        "Clustered regions"
    );
    clusters
}

/// Density-based clustering over pixel positions.
///
/// A point is a core point when at least `min_samples` points (itself
/// included) lie within Euclidean distance `eps`. Returns a cluster label per
/// point, `None` for noise. Labels are assigned in order of the first core
/// point of each cluster.
pub fn dbscan(points: &[PixelPoint], eps: f64, min_samples: usize) -> Vec<Option<usize>> {
    let n = points.len();
    let eps_sq = eps * eps;
    let coords: Vec<[f64; 2]> = points.iter().map(|p| [p.x as f64, p.y as f64]).collect();
    let tree: RTree<IndexedPoint> = RTree::bulk_load(
        coords
            .iter()
            .enumerate()
            .map(|(i, &c)| IndexedPoint::new(c, i))
            .collect(),
    );

    let neighbors = |i: usize| -> Vec<usize> {
        tree.locate_within_distance(coords[i], eps_sq)
            .map(|entry| entry.data)
            .collect()
    };

    let is_core: Vec<bool> = (0..n)
        .map(|i| {
            tree.locate_within_distance(coords[i], eps_sq)
                .take(min_samples)
                .count()
                >= min_samples
        })
        .collect();

    let mut labels: Vec<Option<usize>> = vec![None; n];
    let mut next_label = 0usize;
    let mut stack = Vec::new();

    for seed in 0..n {
        if labels[seed].is_some() || !is_core[seed] {
            continue;
        }

        stack.push(seed);
        while let Some(i) = stack.pop() {
            if labels[i].is_some() {
                continue;
            }
            labels[i] = Some(next_label);
            if is_core[i] {
                stack.extend(neighbors(i).into_iter().filter(|&j| labels[j].is_none()));
            }
        }
        next_label += 1;
    }

    labels
}
