use std::path::Path;

use ndarray::s;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{MykoError, Result};
use crate::frame::Frame;

use super::image_io::{decode_frame, encode_png};
use super::store::write_atomic;

/// Pixel insets removed from each edge before geographic processing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropInsets {
    #[serde(default)]
    pub left: u32,
    #[serde(default)]
    pub right: u32,
    #[serde(default)]
    pub top: u32,
    #[serde(default)]
    pub bottom: u32,
}

impl CropInsets {
    pub fn is_noop(&self) -> bool {
        self.left == 0 && self.right == 0 && self.top == 0 && self.bottom == 0
    }

    /// Output (width, height) for a source of the given size.
    ///
    /// Rejects insets that would leave zero or negative output dimensions.
    pub fn output_size(&self, src_w: u32, src_h: u32) -> Result<(u32, u32)> {
        let horizontal = self.left as u64 + self.right as u64;
        let vertical = self.top as u64 + self.bottom as u64;

        if horizontal >= src_w as u64 || vertical >= src_h as u64 {
            return Err(MykoError::InvalidCropGeometry {
                left: self.left,
                right: self.right,
                top: self.top,
                bottom: self.bottom,
                width: src_w,
                height: src_h,
            });
        }

        Ok((src_w - horizontal as u32, src_h - vertical as u32))
    }
}

/// Crop a frame in memory.
pub fn crop_frame(frame: &Frame, insets: &CropInsets) -> Result<Frame> {
    let (w, h) = insets.output_size(frame.width() as u32, frame.height() as u32)?;
    if insets.is_noop() {
        return Ok(frame.clone());
    }

    let top = insets.top as usize;
    let left = insets.left as usize;
    let view = frame
        .data
        .slice(s![top..top + h as usize, left..left + w as usize, ..]);
    Ok(Frame::new(view.to_owned(), frame.date))
}

/// Crop an image file and write the result as PNG to `output`.
///
/// Geometry is validated before anything is written; on failure neither file
/// is touched. `output` may equal `input`.
pub fn crop_image_file(input: &Path, output: &Path, insets: &CropInsets) -> Result<(u32, u32)> {
    let bytes = std::fs::read(input)?;
    // Date is irrelevant for a file-level crop.
    let frame = decode_frame(&bytes, chrono::NaiveDate::MIN)?;

    let cropped = match crop_frame(&frame, insets) {
        Ok(cropped) => cropped,
        Err(e) => {
            warn!(input = %input.display(), error = %e, "Crop rejected, source left unchanged");
            return Err(e);
        }
    };

    let png = encode_png(&cropped)?;
    write_atomic(output, &png)?;

    let size = (cropped.width() as u32, cropped.height() as u32);
    info!(
        input = %input.display(),
        output = %output.display(),
        width = size.0,
        height = size.1,
        "Cropped image"
    );
    Ok(size)
}
