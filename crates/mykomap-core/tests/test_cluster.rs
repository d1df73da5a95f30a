mod common;

use mykomap_core::detection::cluster::dbscan;
use mykomap_core::detection::{cluster_regions, ClusterConfig, PixelPoint};

use common::block_region;

#[test]
fn test_three_regions_pass_through_unchanged() {
    let regions = vec![
        block_region(1, 0, 0, 2, 2),
        block_region(2, 3, 0, 2, 2),
        block_region(3, 200, 200, 1, 1),
    ];
    let clusters = cluster_regions(regions.clone(), &ClusterConfig::default());

    assert_eq!(clusters.len(), 3);
    for (i, (cluster, region)) in clusters.iter().zip(&regions).enumerate() {
        assert_eq!(cluster.id, i);
        assert_eq!(cluster.points, region.points);
        assert_eq!(cluster.source_regions, vec![region.label]);
    }
}

#[test]
fn test_nearby_regions_merge_and_isolated_points_drop() {
    let regions = vec![
        block_region(1, 0, 0, 5, 5),
        block_region(2, 10, 0, 5, 5),
        block_region(3, 100, 100, 5, 5),
        block_region(4, 110, 100, 5, 5),
        block_region(5, 300, 300, 1, 1),
    ];
    let clusters = cluster_regions(regions, &ClusterConfig::default());

    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].id, 0);
    assert_eq!(clusters[0].source_regions, vec![1, 2]);
    assert_eq!(clusters[0].area(), 50);
    assert_eq!(clusters[1].source_regions, vec![3, 4]);
    assert_eq!(clusters[1].area(), 50);
    assert!(clusters
        .iter()
        .all(|c| !c.points.contains(&PixelPoint::new(300, 300))));
}

#[test]
fn test_all_noise_yields_no_clusters() {
    let regions = (0..4)
        .map(|i| block_region(i + 1, i * 100, 0, 1, 1))
        .collect();
    let clusters = cluster_regions(regions, &ClusterConfig::default());
    assert!(clusters.is_empty());
}

#[test]
fn test_empty_input() {
    assert!(cluster_regions(Vec::new(), &ClusterConfig::default()).is_empty());
}

#[test]
fn test_dbscan_radius_is_inclusive() {
    let points = vec![
        PixelPoint::new(0, 0),
        PixelPoint::new(3, 0),
        PixelPoint::new(6, 0),
        PixelPoint::new(20, 0),
    ];
    let labels = dbscan(&points, 3.0, 2);
    assert_eq!(labels, vec![Some(0), Some(0), Some(0), None]);
}

#[test]
fn test_dbscan_border_point_joins_cluster() {
    // (4, 0) has only one neighbor, so it is a border point of the left group.
    let points = vec![
        PixelPoint::new(0, 0),
        PixelPoint::new(1, 0),
        PixelPoint::new(2, 0),
        PixelPoint::new(4, 0),
    ];
    let labels = dbscan(&points, 2.0, 3);
    assert_eq!(labels, vec![Some(0), Some(0), Some(0), Some(0)]);
}

#[test]
fn test_dbscan_separate_clusters_in_first_seen_order() {
    let points = vec![
        PixelPoint::new(50, 50),
        PixelPoint::new(51, 50),
        PixelPoint::new(0, 0),
        PixelPoint::new(1, 0),
    ];
    let labels = dbscan(&points, 1.5, 2);
    assert_eq!(labels, vec![Some(0), Some(0), Some(1), Some(1)]);
}
