mod common;

use mykomap_core::color::{color_mask, mask_count, ColorBand, ProbabilityClass};
use mykomap_core::frame::Frame;

use common::{blank_frame, day, paint_rect, HIGH, VERY_HIGH};

#[test]
fn test_band_edges_for_high_class() {
    let band = ColorBand::new(HIGH, 0.03);
    assert!(band.contains([176, 221, 156]));
    assert!(band.contains([181, 221, 156]));
    assert!(!band.contains([182, 221, 156]));
    assert!(band.contains([171, 221, 156]));
    assert!(!band.contains([170, 221, 156]));
}

#[test]
fn test_band_is_inclusive_at_exact_integer_edges() {
    let band = ColorBand::new([100, 100, 100], 0.03);
    assert_eq!(band.lower, [97.0; 3]);
    assert_eq!(band.upper, [103.0; 3]);
    assert!(band.contains([103, 100, 100]));
    assert!(band.contains([97, 100, 100]));
    assert!(band.contains([100, 97, 103]));
    assert!(!band.contains([104, 100, 100]));
    assert!(!band.contains([100, 96, 100]));

    let frame = Frame::filled(4, 3, [103, 97, 100], day(1));
    assert_eq!(mask_count(&color_mask(&frame.data, [100, 100, 100], 0.03)), 12);
}

#[test]
fn test_zero_channel_matches_only_zero() {
    let band = ColorBand::new([0, 0, 255], 0.03);
    assert!(band.contains([0, 0, 250]));
    assert!(!band.contains([1, 0, 255]));
}

#[test]
fn test_mask_marks_only_class_pixels() {
    let mut frame = blank_frame(10, 8, day(1));
    paint_rect(&mut frame, 2, 3, 4, 2, HIGH);
    paint_rect(&mut frame, 7, 0, 1, 1, VERY_HIGH);

    let mask = color_mask(&frame.data, HIGH, 0.03);
    assert_eq!(mask.dim(), (8, 10));
    assert_eq!(mask_count(&mask), 8);
    assert!(mask[[3, 2]]);
    assert!(mask[[4, 5]]);
    assert!(!mask[[0, 7]]);
    assert!(!mask[[0, 0]]);
}

#[test]
fn test_parallel_path_matches_sequential_layout() {
    // 300x300 crosses the row-parallel threshold.
    let mut frame = blank_frame(300, 300, day(1));
    paint_rect(&mut frame, 100, 50, 20, 10, VERY_HIGH);

    let mask = color_mask(&frame.data, VERY_HIGH, 0.03);
    assert_eq!(mask_count(&mask), 200);
    assert!(mask[[50, 100]]);
    assert!(mask[[59, 119]]);
    assert!(!mask[[60, 100]]);
    assert!(!mask[[50, 120]]);
}

#[test]
fn test_uniform_frame_of_class_color() {
    let frame = Frame::filled(5, 5, VERY_HIGH, day(2));
    let class = ProbabilityClass::very_high();
    let mask = color_mask(&frame.data, class.rgb, 0.03);
    assert_eq!(mask_count(&mask), 25);
}
