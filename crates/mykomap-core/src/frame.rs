use chrono::NaiveDate;
use ndarray::Array3;

use crate::consts::{COLOR_CHANNEL_COUNT, DATE_KEY_FORMAT};
use crate::error::{MykoError, Result};

/// An RGB triple, 8 bits per channel.
pub type Rgb = [u8; 3];

/// A single dated RGB map frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Pixel data, shape = (height, width, 3)
    pub data: Array3<u8>,
    /// Publication date of the map. One frame is retained per date.
    pub date: NaiveDate,
}

impl Frame {
    pub fn new(data: Array3<u8>, date: NaiveDate) -> Self {
        debug_assert_eq!(data.dim().2, COLOR_CHANNEL_COUNT);
        Self { data, date }
    }

    /// Frame of the given size filled with a single color.
    pub fn filled(width: usize, height: usize, color: Rgb, date: NaiveDate) -> Self {
        let mut data = Array3::<u8>::zeros((height, width, COLOR_CHANNEL_COUNT));
        for row in 0..height {
            for col in 0..width {
                for c in 0..COLOR_CHANNEL_COUNT {
                    data[[row, col, c]] = color[c];
                }
            }
        }
        Self { data, date }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// (height, width)
    pub fn dims(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    pub fn pixel(&self, row: usize, col: usize) -> Rgb {
        pixel_at(&self.data, row, col)
    }

    pub fn date_key(&self) -> String {
        format_date_key(self.date)
    }
}

/// Read one RGB pixel out of an (h, w, 3) array.
pub fn pixel_at(data: &Array3<u8>, row: usize, col: usize) -> Rgb {
    [data[[row, col, 0]], data[[row, col, 1]], data[[row, col, 2]]]
}

/// Format a date as the `dd.mm.yyyy` key used in artifact names.
pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a `dd.mm.yyyy` date key.
pub fn parse_date_key(key: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT)
        .map_err(|e| MykoError::InvalidDate(format!("{key}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_key_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 7).unwrap();
        assert_eq!(format_date_key(date), "07.09.2025");
        assert_eq!(parse_date_key("07.09.2025").unwrap(), date);
    }

    #[test]
    fn test_parse_date_key_rejects_iso() {
        assert!(matches!(
            parse_date_key("2025-09-07"),
            Err(MykoError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_filled_frame_dims() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let frame = Frame::filled(5, 3, [1, 2, 3], date);
        assert_eq!(frame.dims(), (3, 5));
        assert_eq!(frame.pixel(2, 4), [1, 2, 3]);
    }
}
