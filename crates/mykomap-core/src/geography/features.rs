use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::consts::MIN_RING_POSITIONS;
use crate::detection::Cluster;
use crate::error::{MykoError, Result};
use crate::frame::format_date_key;

use super::config::OutputConfig;
use super::mapper::CoordinateMapper;
use super::polygon::{polygonize, GeoRing};

/// Feature collection for one run plus the number of clusters that could
/// not be turned into a polygon.
#[derive(Clone, Debug)]
pub struct FeatureBuild {
    pub collection: FeatureCollection,
    pub skipped: usize,
}

/// Polygonize every cluster and wrap the results in a feature collection.
///
/// Degenerate clusters are logged and skipped. Feature ids are sequential in
/// input order over the emitted features.
pub fn build_feature_collection(
    clusters: &[Cluster],
    mapper: &CoordinateMapper,
    date: NaiveDate,
    output: &OutputConfig,
    processed_at: DateTime<Utc>,
) -> Result<FeatureBuild> {
    build_feature_collection_with_progress(clusters, mapper, date, output, processed_at, |_| {})
}

/// Like [`build_feature_collection`], calling `on_cluster` with the number of
/// clusters handled so far after each one.
pub fn build_feature_collection_with_progress(
    clusters: &[Cluster],
    mapper: &CoordinateMapper,
    date: NaiveDate,
    output: &OutputConfig,
    processed_at: DateTime<Utc>,
    mut on_cluster: impl FnMut(usize),
) -> Result<FeatureBuild> {
    let date_key = format_date_key(date);
    let timestamp = processed_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut features = Vec::new();
    let mut skipped = 0usize;

    for (i, cluster) in clusters.iter().enumerate() {
        match polygonize(&cluster.points, mapper) {
            Ok(ring) if ring.len() >= MIN_RING_POSITIONS => {
                let id = features.len();
                let mut properties = JsonObject::new();
                properties.insert("id".into(), json!(id));
                properties.insert("date".into(), json!(date_key));
                properties.insert("area_pixels".into(), json!(cluster.area()));
                properties.insert("probability".into(), json!(output.probability_label));
                properties.insert("created".into(), json!(timestamp));

                debug!(id, positions = ring.len(), area = cluster.area(), "Created feature");
                features.push(Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(ring_to_value(&ring))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                });
            }
            Ok(ring) => {
                warn!(cluster = cluster.id, positions = ring.len(), "Skipping short ring");
                skipped += 1;
            }
            Err(e @ MykoError::DegeneratePolygon { .. }) => {
                warn!(cluster = cluster.id, date = %date_key, error = %e, "Skipping cluster");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
        on_cluster(i + 1);
    }

    let bounds = mapper.bounds();
    let metadata = json!({
        "date": date_key,
        "coordinate_system": output.coordinate_system,
        "source": output.source,
        "bounds": {
            "north": bounds.north,
            "south": bounds.south,
            "east": bounds.east,
            "west": bounds.west,
        },
        "total_features": features.len(),
        "processing_timestamp": timestamp,
    });
    let mut foreign_members = JsonObject::new();
    foreign_members.insert("metadata".into(), metadata);

    info!(date = %date_key, features = features.len(), skipped, "Built feature collection");
    Ok(FeatureBuild {
        collection: FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        },
        skipped,
    })
}

fn ring_to_value(ring: &GeoRing) -> Value {
    Value::Polygon(vec![ring.iter().map(|&(lon, lat)| vec![lon, lat]).collect()])
}

/// Exterior ring of a polygon feature, if it has one.
pub fn feature_ring(feature: &Feature) -> Option<GeoRing> {
    match &feature.geometry.as_ref()?.value {
        Value::Polygon(rings) => rings.first().map(|exterior| {
            exterior
                .iter()
                .filter(|pos| pos.len() >= 2)
                .map(|pos| (pos[0], pos[1]))
                .collect()
        }),
        _ => None,
    }
}

/// Collection-level metadata object, if present.
pub fn collection_metadata(collection: &FeatureCollection) -> Option<&JsonObject> {
    collection
        .foreign_members
        .as_ref()?
        .get("metadata")
        .and_then(JsonValue::as_object)
}

/// Pretty-printed GeoJSON text.
pub fn to_geojson_string(collection: &FeatureCollection) -> Result<String> {
    Ok(serde_json::to_string_pretty(collection)?)
}

pub fn parse_feature_collection(text: &str) -> Result<FeatureCollection> {
    match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        other => Err(MykoError::Pipeline(format!(
            "expected a FeatureCollection, found {}",
            geojson_kind(&other)
        ))),
    }
}

fn geojson_kind(value: &GeoJson) -> &'static str {
    match value {
        GeoJson::Geometry(_) => "Geometry",
        GeoJson::Feature(_) => "Feature",
        GeoJson::FeatureCollection(_) => "FeatureCollection",
    }
}
