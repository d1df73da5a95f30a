pub mod config;
pub mod features;
pub mod kml;
pub mod mapper;
pub mod polygon;
pub mod query;

pub use config::{KmlStyle, OutputConfig};
pub use features::{
    build_feature_collection, build_feature_collection_with_progress, collection_metadata, feature_ring, parse_feature_collection,
    to_geojson_string, FeatureBuild,
};
pub use kml::to_kml_string;
pub use mapper::{CoordinateMapper, GeoBounds};
pub use polygon::{hull_vertices, polygonize, GeoRing};
pub use query::{query_region, RegionQuery};
