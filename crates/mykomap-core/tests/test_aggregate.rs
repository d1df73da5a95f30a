mod common;

use approx::assert_abs_diff_eq;
use mykomap_core::composite::{aggregate_surfaces, AggregationConfig};
use mykomap_core::error::MykoError;

use common::{blank_frame, day, frame_with_rect, paint_rect, HIGH, VERY_HIGH};

fn surface<'a>(
    surfaces: &'a [mykomap_core::composite::ProbabilitySurface],
    name: &str,
) -> &'a mykomap_core::composite::ProbabilitySurface {
    surfaces.iter().find(|s| s.class.name == name).unwrap()
}

#[test]
fn test_single_occurrence_is_gated_to_zero() {
    // The cell is set only in the newest of three frames.
    let frames = vec![
        frame_with_rect(6, 6, day(3), (1, 1, 2, 2), VERY_HIGH),
        blank_frame(6, 6, day(2)),
        blank_frame(6, 6, day(1)),
    ];
    let surfaces = aggregate_surfaces(&frames, &AggregationConfig::default()).unwrap();
    let very_high = surface(&surfaces, "very_high");

    assert_eq!(very_high.occurrences[[1, 1]], 1);
    assert_eq!(very_high.weights[[1, 1]], 0.0);
    assert!(very_high.weights.iter().all(|&w| w == 0.0));
}

#[test]
fn test_two_occurrences_keep_weighted_sum() {
    let frames = vec![
        frame_with_rect(6, 6, day(3), (0, 0, 3, 3), VERY_HIGH),
        blank_frame(6, 6, day(2)),
        frame_with_rect(6, 6, day(1), (0, 0, 3, 3), VERY_HIGH),
    ];
    let surfaces = aggregate_surfaces(&frames, &AggregationConfig::default()).unwrap();
    let very_high = surface(&surfaces, "very_high");

    assert_eq!(very_high.occurrences[[0, 0]], 2);
    assert_abs_diff_eq!(very_high.weights[[0, 0]], 0.4 + 0.2, epsilon = 1e-6);
    assert_eq!(very_high.weights[[4, 4]], 0.0);
}

#[test]
fn test_classes_accumulate_independently() {
    let mut newest = blank_frame(8, 4, day(2));
    paint_rect(&mut newest, 0, 0, 2, 2, HIGH);
    paint_rect(&mut newest, 4, 0, 2, 2, VERY_HIGH);
    let older = newest.clone();

    let surfaces = aggregate_surfaces(&[newest, older], &AggregationConfig::default()).unwrap();
    let high = surface(&surfaces, "high");
    let very_high = surface(&surfaces, "very_high");

    assert_abs_diff_eq!(high.weights[[0, 0]], 0.7, epsilon = 1e-6);
    assert_eq!(high.weights[[0, 4]], 0.0);
    assert_abs_diff_eq!(very_high.weights[[1, 5]], 0.7, epsilon = 1e-6);
    assert_eq!(very_high.weights[[1, 1]], 0.0);
}

#[test]
fn test_frames_beyond_window_are_ignored() {
    let config = AggregationConfig {
        weights: vec![0.5, 0.25],
        ..Default::default()
    };
    // Only the third frame shares the newest frame's area; it is outside the window.
    let frames = vec![
        frame_with_rect(4, 4, day(3), (0, 0, 1, 1), HIGH),
        blank_frame(4, 4, day(2)),
        frame_with_rect(4, 4, day(1), (0, 0, 1, 1), HIGH),
    ];
    let surfaces = aggregate_surfaces(&frames, &config).unwrap();
    let high = surface(&surfaces, "high");
    assert_eq!(high.occurrences[[0, 0]], 1);
    assert_eq!(high.weights[[0, 0]], 0.0);
}

#[test]
fn test_empty_sequence_is_rejected() {
    let result = aggregate_surfaces(&[], &AggregationConfig::default());
    assert!(matches!(result, Err(MykoError::EmptySequence)));
}

#[test]
fn test_mismatched_frame_sizes_are_rejected() {
    let frames = vec![blank_frame(6, 6, day(2)), blank_frame(5, 6, day(1))];
    let result = aggregate_surfaces(&frames, &AggregationConfig::default());
    assert!(matches!(
        result,
        Err(MykoError::DimensionMismatch {
            expected: (6, 6),
            actual: (6, 5)
        })
    ));
}

#[test]
fn test_invalid_weights_are_rejected() {
    let config = AggregationConfig {
        weights: vec![],
        ..Default::default()
    };
    let frames = vec![blank_frame(2, 2, day(1))];
    assert!(matches!(
        aggregate_surfaces(&frames, &config),
        Err(MykoError::InvalidConfig(_))
    ));
}
