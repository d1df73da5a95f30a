#![allow(dead_code)]

use chrono::NaiveDate;
use ndarray::Array2;

use mykomap_core::detection::{PixelPoint, PixelRegion};
use mykomap_core::frame::{Frame, Rgb};

pub const WHITE: Rgb = [255, 255, 255];
pub const HIGH: Rgb = [176, 221, 156];
pub const VERY_HIGH: Rgb = [112, 189, 143];
pub const HIGHLIGHT: Rgb = [0, 0, 255];

/// A date in September 2025.
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
}

/// White frame of the given size.
pub fn blank_frame(width: usize, height: usize, date: NaiveDate) -> Frame {
    Frame::filled(width, height, WHITE, date)
}

/// Paint a `w x h` rectangle with its top-left corner at column `x`, row `y`.
pub fn paint_rect(frame: &mut Frame, x: usize, y: usize, w: usize, h: usize, color: Rgb) {
    for row in y..y + h {
        for col in x..x + w {
            for c in 0..3 {
                frame.data[[row, col, c]] = color[c];
            }
        }
    }
}

/// White frame with one colored rectangle.
pub fn frame_with_rect(
    width: usize,
    height: usize,
    date: NaiveDate,
    rect: (usize, usize, usize, usize),
    color: Rgb,
) -> Frame {
    let mut frame = blank_frame(width, height, date);
    paint_rect(&mut frame, rect.0, rect.1, rect.2, rect.3, color);
    frame
}

/// Boolean mask with the listed (row, col) cells set.
pub fn mask_from_cells(height: usize, width: usize, cells: &[(usize, usize)]) -> Array2<bool> {
    let mut mask = Array2::from_elem((height, width), false);
    for &(row, col) in cells {
        mask[[row, col]] = true;
    }
    mask
}

/// Region covering a filled `w x h` block at (x, y).
pub fn block_region(label: u32, x: u32, y: u32, w: u32, h: u32) -> PixelRegion {
    let mut points = Vec::new();
    for row in y..y + h {
        for col in x..x + w {
            points.push(PixelPoint::new(col, row));
        }
    }
    PixelRegion { label, points }
}
