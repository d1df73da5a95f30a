use geo::{Contains, LineString, Point, Polygon};
use geojson::{FeatureCollection, JsonObject};
use serde::Serialize;

use super::features::feature_ring;

/// Answer to "is this location inside a detected area?".
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegionQuery {
    pub found: bool,
    /// Properties of the first containing feature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<JsonObject>,
    /// The queried `[longitude, latitude]`.
    pub coordinates: [f64; 2],
}

/// Find the first feature whose polygon strictly contains the point.
///
/// Points exactly on a polygon boundary are not inside.
pub fn query_region(collection: &FeatureCollection, lon: f64, lat: f64) -> RegionQuery {
    let point = Point::new(lon, lat);

    let hit = collection.features.iter().find(|feature| {
        feature_ring(feature)
            .filter(|ring| ring.len() >= 4)
            .map(|ring| Polygon::new(LineString::from(ring), vec![]).contains(&point))
            .unwrap_or(false)
    });

    RegionQuery {
        found: hit.is_some(),
        properties: hit.and_then(|f| f.properties.clone()),
        coordinates: [lon, lat],
    }
}
