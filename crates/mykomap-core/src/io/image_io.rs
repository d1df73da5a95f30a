use std::io::Cursor;
use std::path::Path;

use chrono::NaiveDate;
use image::{ImageFormat, Rgb, RgbImage};
use ndarray::Array3;

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{MykoError, Result};
use crate::frame::Frame;

/// Convert an `RgbImage` into an (h, w, 3) array.
pub fn rgb_image_to_array(img: &RgbImage) -> Array3<u8> {
    let (w, h) = img.dimensions();
    let mut data = Array3::<u8>::zeros((h as usize, w as usize, COLOR_CHANNEL_COUNT));

    for (col, row, pixel) in img.enumerate_pixels() {
        for c in 0..COLOR_CHANNEL_COUNT {
            data[[row as usize, col as usize, c]] = pixel.0[c];
        }
    }

    data
}

/// Convert an (h, w, 3) array into an `RgbImage`.
pub fn array_to_rgb_image(data: &Array3<u8>) -> RgbImage {
    let (h, w, _) = data.dim();
    let mut img = RgbImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            img.put_pixel(
                col as u32,
                row as u32,
                Rgb([data[[row, col, 0]], data[[row, col, 1]], data[[row, col, 2]]]),
            );
        }
    }
    img
}

/// Decode an image of any supported format into an RGB frame.
pub fn decode_frame(bytes: &[u8], date: NaiveDate) -> Result<Frame> {
    let img = image::load_from_memory(bytes)?.to_rgb8();
    if img.width() == 0 || img.height() == 0 {
        return Err(MykoError::Pipeline(format!(
            "decoded image for {date} is empty"
        )));
    }
    Ok(Frame::new(rgb_image_to_array(&img), date))
}

/// Encode a frame as PNG bytes.
pub fn encode_png(frame: &Frame) -> Result<Vec<u8>> {
    let img = array_to_rgb_image(&frame.data);
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Load an image file into a frame with the given date.
pub fn load_frame(path: &Path, date: NaiveDate) -> Result<Frame> {
    let bytes = std::fs::read(path)?;
    decode_frame(&bytes, date)
}

/// Save a frame as 8-bit RGB PNG.
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    let img = array_to_rgb_image(&frame.data);
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
