mod common;

use mykomap_core::detection::{
    default_strategies, extract_regions, label_regions, DetectionConfig, StrategyKind,
};
use mykomap_core::frame::Frame;

use common::{
    blank_frame, day, frame_with_rect, mask_from_cells, paint_rect, HIGH, HIGHLIGHT, VERY_HIGH,
};

#[test]
fn test_diagonal_pixels_are_separate_regions() {
    let mask = mask_from_cells(3, 3, &[(0, 0), (1, 1), (2, 2)]);
    let regions = label_regions(&mask);
    assert_eq!(regions.len(), 3);
    assert!(regions.iter().all(|r| r.area() == 1));
}

#[test]
fn test_u_shape_is_one_region() {
    // Two arms joined only at the bottom row must merge.
    let mask = mask_from_cells(
        3,
        3,
        &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2)],
    );
    let regions = label_regions(&mask);
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].area(), 7);
    assert_eq!(regions[0].label, 1);
}

#[test]
fn test_labels_follow_raster_order() {
    let mask = mask_from_cells(4, 6, &[(0, 5), (3, 0), (3, 1)]);
    let regions = label_regions(&mask);
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0].label, 1);
    assert_eq!(regions[0].points[0].x, 5);
    assert_eq!(regions[1].label, 2);
    assert_eq!(regions[1].area(), 2);
    assert_eq!(regions[1].bbox(), Some((3, 3, 0, 1)));
}

#[test]
fn test_empty_mask_has_no_regions() {
    let mask = mask_from_cells(5, 5, &[]);
    assert!(label_regions(&mask).is_empty());
}

#[test]
fn test_highlight_strategy_wins_over_others() {
    let mut frame = blank_frame(40, 40, day(1));
    paint_rect(&mut frame, 2, 2, 5, 5, HIGHLIGHT);
    paint_rect(&mut frame, 20, 20, 10, 10, VERY_HIGH);
    paint_rect(&mut frame, 20, 2, 10, 10, [20, 20, 20]);

    let config = DetectionConfig::default();
    let result = extract_regions(
        &frame.data,
        &default_strategies(&config),
        config.effective_min_area(),
    );
    assert_eq!(result.strategy, Some(StrategyKind::Highlight));
    assert_eq!(result.matched_pixels, 25);
    assert_eq!(result.regions.len(), 1);
}

#[test]
fn test_blue_dominant_fallback() {
    // Blue dominates by more than 100 but red is above the highlight limit.
    let frame = frame_with_rect(30, 30, day(1), (5, 5, 6, 6), [60, 40, 220]);
    let config = DetectionConfig::default();
    let result = extract_regions(&frame.data, &default_strategies(&config), 10);
    assert_eq!(result.strategy, Some(StrategyKind::BlueDominant));
    assert_eq!(result.regions.len(), 1);
    assert_eq!(result.regions[0].area(), 36);
}

#[test]
fn test_class_color_fallback_with_wide_tolerance() {
    let mut frame = blank_frame(30, 30, day(1));
    // Within 30 of the high class color on every channel.
    paint_rect(&mut frame, 0, 0, 5, 5, [196, 240, 130]);
    paint_rect(&mut frame, 10, 10, 5, 5, HIGH);
    let config = DetectionConfig::default();
    let result = extract_regions(&frame.data, &default_strategies(&config), 10);
    assert_eq!(result.strategy, Some(StrategyKind::ClassColor));
    assert_eq!(result.regions.len(), 2);
}

#[test]
fn test_dark_fallback() {
    let frame = frame_with_rect(30, 30, day(1), (3, 3, 4, 4), [100, 100, 100]);
    let config = DetectionConfig::default();
    let result = extract_regions(&frame.data, &default_strategies(&config), 10);
    assert_eq!(result.strategy, Some(StrategyKind::Dark));
    assert_eq!(result.regions[0].area(), 16);
}

#[test]
fn test_nothing_matches_yields_empty_result() {
    let frame = Frame::filled(20, 20, [255, 255, 255], day(1));
    let config = DetectionConfig::default();
    let result = extract_regions(&frame.data, &default_strategies(&config), 10);
    assert!(result.is_empty());
    assert_eq!(result.strategy, None);
    assert_eq!(result.matched_pixels, 0);
}

#[test]
fn test_small_regions_are_discarded() {
    let mut frame = blank_frame(40, 40, day(1));
    paint_rect(&mut frame, 0, 0, 3, 3, HIGHLIGHT);
    paint_rect(&mut frame, 10, 10, 4, 4, HIGHLIGHT);
    let config = DetectionConfig::default();
    assert_eq!(config.effective_min_area(), 10);

    let result = extract_regions(
        &frame.data,
        &default_strategies(&config),
        config.effective_min_area(),
    );
    assert_eq!(result.components_found, 2);
    assert_eq!(result.regions.len(), 1);
    assert_eq!(result.regions[0].area(), 16);
}

#[test]
fn test_min_area_derivation() {
    let config = DetectionConfig {
        min_feature_area: 500,
        ..Default::default()
    };
    assert_eq!(config.effective_min_area(), 50);

    let explicit = DetectionConfig {
        min_region_area: Some(3),
        ..Default::default()
    };
    assert_eq!(explicit.effective_min_area(), 3);
}
