use super::*;

#[test]
fn parse_accepts_space_and_comma_forms() {
    assert_eq!(
        LatLong::parse("48.137 11.575").unwrap(),
        LatLong {
            lat: 48.137,
            long: 11.575
        }
    );
    assert_eq!(
        LatLong::parse("  -33.86, 151.21 ").unwrap(),
        LatLong {
            lat: -33.86,
            long: 151.21
        }
    );
}

#[test]
fn parse_rejects_malformed_text() {
    for s in ["", "48.1", "48.1,11.5", "a b", "1 2 3", "91 0", "0 181"] {
        assert!(
            matches!(LatLong::parse(s), Err(PhotostoryError::Validation(_))),
            "{s:?} should be rejected"
        );
    }
}

#[test]
fn coordinate_forms_deserialize() {
    let coords: Vec<GpsCoordinate> =
        serde_json::from_str(r#"[[10.5, 20.25], "1.0, 2.0"]"#).unwrap();
    assert_eq!(coords[0], GpsCoordinate::Pair(vec![10.5, 20.25]));
    assert_eq!(coords[1], GpsCoordinate::Text("1.0, 2.0".to_string()));
    assert_eq!(coords[0].lat_long().unwrap().long, 20.25);
    assert_eq!(coords[1].lat_long().unwrap().lat, 1.0);
    assert!(GpsCoordinate::Pair(vec![1.0]).lat_long().is_err());
}

#[test]
fn projection_corners_and_center() {
    let map = Size::new(360.0, 180.0);
    let p = LatLong::new(0.0, 0.0).unwrap().to_map_xy(map);
    assert_eq!(p, Point::new(180.0, 90.0));
    let p = LatLong::new(-90.0, -180.0).unwrap().to_map_xy(map);
    assert_eq!(p, Point::new(0.0, 0.0));
    let p = LatLong::new(90.0, 180.0).unwrap().to_map_xy(map);
    assert_eq!(p, Point::new(360.0, 180.0));
}

#[test]
fn world_map_fits_canvas_width() {
    let canvas = Rectangle::new(0.0, 0.0, 1920.0, 1080.0);
    let map = world_map_rect(&canvas);
    assert_eq!(map.width, 1920.0);
    assert_eq!(map.height, 960.0);
    assert_eq!(map.x, 0.0);
    assert_eq!(map.y, 1620.0);
    assert!(map.top() > canvas.bottom());

    let narrow = world_map_rect(&Rectangle::new(0.0, 0.0, 1000.0, 1000.0));
    assert_eq!(narrow.height, 500.0);
}

#[test]
fn route_length_sums_segments() {
    assert_eq!(route_length(&[]), 0.0);
    assert_eq!(route_length(&[Point::new(1.0, 1.0)]), 0.0);
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(3.0, 4.0),
        Point::new(3.0, 10.0),
    ];
    assert_eq!(route_length(&pts), 11.0);
}

#[test]
fn coordinate_arrays_accept_numeric_strings() {
    let coords: Vec<GpsCoordinate> =
        serde_json::from_str(r#"[["48.1", "11.5"], [" -33.86 ", 151.21]]"#).unwrap();
    assert_eq!(coords[0], GpsCoordinate::Pair(vec![48.1, 11.5]));
    assert_eq!(
        coords[1].lat_long().unwrap(),
        LatLong {
            lat: -33.86,
            long: 151.21
        }
    );

    assert!(serde_json::from_str::<GpsCoordinate>(r#"["north", "11.5"]"#).is_err());
}
