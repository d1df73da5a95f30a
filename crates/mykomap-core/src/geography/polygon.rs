use geo::{Area, ConvexHull, MultiPoint, Point};

use crate::detection::PixelPoint;
use crate::error::{MykoError, Result};

use super::mapper::CoordinateMapper;

/// Closed ring of (longitude, latitude) positions; first position repeated last.
pub type GeoRing = Vec<(f64, f64)>;

/// Convex hull of a pixel set, in pixel space, without the closing vertex.
///
/// Fails for fewer than 3 points and for collinear sets.
pub fn hull_vertices(points: &[PixelPoint]) -> Result<Vec<PixelPoint>> {
    if points.len() < 3 {
        return Err(MykoError::DegeneratePolygon {
            points: points.len(),
            reason: "fewer than 3 points".into(),
        });
    }

    let multi: MultiPoint<f64> = points
        .iter()
        .map(|p| Point::new(p.x as f64, p.y as f64))
        .collect::<Vec<_>>()
        .into();
    let hull = multi.convex_hull();

    if hull.unsigned_area() <= 0.0 {
        return Err(MykoError::DegeneratePolygon {
            points: points.len(),
            reason: "points are collinear".into(),
        });
    }

    let mut vertices: Vec<PixelPoint> = hull
        .exterior()
        .coords()
        .map(|c| PixelPoint::new(c.x as u32, c.y as u32))
        .collect();
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    vertices.dedup();

    if vertices.len() < 3 {
        return Err(MykoError::DegeneratePolygon {
            points: points.len(),
            reason: format!("hull has {} distinct vertices", vertices.len()),
        });
    }
    Ok(vertices)
}

/// Convex-hull polygon of a pixel set, mapped to geographic coordinates.
pub fn polygonize(points: &[PixelPoint], mapper: &CoordinateMapper) -> Result<GeoRing> {
    let vertices = hull_vertices(points)?;

    let mut ring = vertices
        .iter()
        .map(|v| mapper.pixel_to_geo(v.x as f64, v.y as f64))
        .collect::<Result<GeoRing>>()?;

    if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
        if first != last {
            ring.push(first);
        }
    }

    tracing::debug!(vertices = ring.len(), "Created polygon");
    Ok(ring)
}
