use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BOUNDS_EAST, DEFAULT_BOUNDS_NORTH, DEFAULT_BOUNDS_SOUTH, DEFAULT_BOUNDS_WEST,
};
use crate::error::{MykoError, Result};

/// Geographic extent covered by the cropped composite, in WGS84 degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self {
            north: DEFAULT_BOUNDS_NORTH,
            south: DEFAULT_BOUNDS_SOUTH,
            east: DEFAULT_BOUNDS_EAST,
            west: DEFAULT_BOUNDS_WEST,
        }
    }
}

impl GeoBounds {
    pub fn lon_span(&self) -> f64 {
        self.east - self.west
    }

    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.lon_span() > 0.0 && self.lat_span() > 0.0) {
            return Err(MykoError::InvalidConfig(format!(
                "bounding box must have east > west and north > south, got {self:?}"
            )));
        }
        Ok(())
    }
}

/// Linear mapping between pixels of the cropped composite and the bounding box.
///
/// Image row 0 is the northern edge. The pixel size must be set from the
/// actual cropped image before any conversion.
#[derive(Clone, Debug)]
pub struct CoordinateMapper {
    bounds: GeoBounds,
    image_size: Option<(u32, u32)>,
}

impl CoordinateMapper {
    pub fn new(bounds: GeoBounds) -> Self {
        Self {
            bounds,
            image_size: None,
        }
    }

    pub fn with_image_size(bounds: GeoBounds, width: u32, height: u32) -> Self {
        let mut mapper = Self::new(bounds);
        mapper.set_image_size(width, height);
        mapper
    }

    /// Record the cropped image size. Zero dimensions leave the mapper unbounded.
    pub fn set_image_size(&mut self, width: u32, height: u32) {
        self.image_size = (width > 0 && height > 0).then_some((width, height));
        tracing::debug!(width, height, "Updated mapper image size");
    }

    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image_size
    }

    pub fn bounds(&self) -> &GeoBounds {
        &self.bounds
    }

    fn size(&self) -> Result<(f64, f64)> {
        self.image_size
            .map(|(w, h)| (w as f64, h as f64))
            .ok_or(MykoError::UnboundedState)
    }

    /// Pixel (column, row) to (longitude, latitude).
    pub fn pixel_to_geo(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let (w, h) = self.size()?;
        let lon = self.bounds.west + (x / w) * self.bounds.lon_span();
        let lat = self.bounds.north - (y / h) * self.bounds.lat_span();
        Ok((lon, lat))
    }

    /// (longitude, latitude) to pixel (column, row), truncated toward zero.
    pub fn geo_to_pixel(&self, lon: f64, lat: f64) -> Result<(i64, i64)> {
        let (w, h) = self.size()?;
        let x = ((lon - self.bounds.west) / self.bounds.lon_span()) * w;
        let y = ((self.bounds.north - lat) / self.bounds.lat_span()) * h;
        Ok((x.trunc() as i64, y.trunc() as i64))
    }
}
