use approx::assert_abs_diff_eq;
use mykomap_core::error::MykoError;
use mykomap_core::geography::{CoordinateMapper, GeoBounds};

fn czech_bounds() -> GeoBounds {
    GeoBounds {
        north: 51.0557,
        south: 48.5518,
        east: 18.8658,
        west: 12.0964,
    }
}

#[test]
fn test_default_bounds() {
    assert_eq!(GeoBounds::default(), czech_bounds());
}

#[test]
fn test_corners_map_to_bounds() {
    let mapper = CoordinateMapper::with_image_size(czech_bounds(), 800, 600);

    let (lon, lat) = mapper.pixel_to_geo(0.0, 0.0).unwrap();
    assert_abs_diff_eq!(lon, 12.0964, epsilon = 1e-9);
    assert_abs_diff_eq!(lat, 51.0557, epsilon = 1e-9);

    let (lon, lat) = mapper.pixel_to_geo(800.0, 600.0).unwrap();
    assert_abs_diff_eq!(lon, 18.8658, epsilon = 1e-9);
    assert_abs_diff_eq!(lat, 48.5518, epsilon = 1e-9);
}

#[test]
fn test_row_zero_is_north() {
    let mapper = CoordinateMapper::with_image_size(czech_bounds(), 100, 100);
    let (_, top) = mapper.pixel_to_geo(50.0, 0.0).unwrap();
    let (_, bottom) = mapper.pixel_to_geo(50.0, 99.0).unwrap();
    assert!(top > bottom);
}

#[test]
fn test_inverse_within_one_pixel() {
    let bounds = czech_bounds();
    let mapper = CoordinateMapper::with_image_size(bounds, 800, 600);
    let px_lon = bounds.lon_span() / 800.0;
    let px_lat = bounds.lat_span() / 600.0;

    for &(lon, lat) in &[(14.42, 50.08), (16.61, 49.19), (12.1, 51.0), (18.8, 48.6)] {
        let (x, y) = mapper.geo_to_pixel(lon, lat).unwrap();
        let (lon2, lat2) = mapper.pixel_to_geo(x as f64, y as f64).unwrap();
        assert!((lon - lon2).abs() <= px_lon, "lon {lon} -> {lon2}");
        assert!((lat - lat2).abs() <= px_lat, "lat {lat} -> {lat2}");
    }
}

#[test]
fn test_geo_to_pixel_truncates() {
    let mapper = CoordinateMapper::with_image_size(czech_bounds(), 800, 600);
    let (lon, lat) = mapper.pixel_to_geo(10.9, 20.9).unwrap();
    assert_eq!(mapper.geo_to_pixel(lon, lat).unwrap(), (10, 20));
}

#[test]
fn test_conversion_without_size_fails() {
    let mapper = CoordinateMapper::new(czech_bounds());
    assert!(matches!(
        mapper.pixel_to_geo(1.0, 1.0),
        Err(MykoError::UnboundedState)
    ));
    assert!(matches!(
        mapper.geo_to_pixel(14.0, 50.0),
        Err(MykoError::UnboundedState)
    ));
}

#[test]
fn test_zero_size_leaves_mapper_unbounded() {
    let mut mapper = CoordinateMapper::new(czech_bounds());
    mapper.set_image_size(0, 600);
    assert_eq!(mapper.image_size(), None);
    mapper.set_image_size(800, 600);
    assert_eq!(mapper.image_size(), Some((800, 600)));
}

#[test]
fn test_inverted_bounds_are_invalid() {
    let bounds = GeoBounds {
        north: 48.0,
        south: 51.0,
        ..czech_bounds()
    };
    assert!(bounds.validate().is_err());
    assert!(czech_bounds().validate().is_ok());
}
