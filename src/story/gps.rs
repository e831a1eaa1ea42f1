//! GPS coordinates and the equirectangular world map they are drawn on.

use crate::foundation::core::{Point, Rectangle, Size};
use crate::foundation::error::{PhotostoryError, PhotostoryResult};

/// Pixel size of the equirectangular world map texture.
pub const WORLD_MAP_SIZE: Size = Size::new(21600.0, 10800.0);

/// Coordinate as written in a story file: `[lat, long]` or `"lat, long"`.
///
/// Array entries may be numbers or numeric strings (`["48.1", "11.5"]`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum GpsCoordinate {
    Pair(#[serde(deserialize_with = "numbers_or_numeric_strings")] Vec<f64>),
    Text(String),
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn numbers_or_numeric_strings<'de, D>(d: D) -> Result<Vec<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Vec<NumberOrText> = serde::Deserialize::deserialize(d)?;
    raw.into_iter()
        .map(|v| match v {
            NumberOrText::Number(n) => Ok(n),
            NumberOrText::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                <D::Error as serde::de::Error>::custom(format!(
                    "gps coordinate entry is not a number: '{s}'"
                ))
            }),
        })
        .collect()
}

impl GpsCoordinate {
    pub fn lat_long(&self) -> PhotostoryResult<LatLong> {
        match self {
            GpsCoordinate::Pair(v) => match v.as_slice() {
                [lat, long] => LatLong::new(*lat, *long),
                _ => Err(PhotostoryError::validation(format!(
                    "gps coordinate array must have 2 entries, got {}",
                    v.len()
                ))),
            },
            GpsCoordinate::Text(s) => LatLong::parse(s),
        }
    }
}

/// Latitude/longitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LatLong {
    pub lat: f64,
    pub long: f64,
}

impl LatLong {
    /// Range-checked constructor: latitude in `[-90, 90]`, longitude in `[-180, 180]`.
    pub fn new(lat: f64, long: f64) -> PhotostoryResult<Self> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&long) {
            return Err(PhotostoryError::validation(format!(
                "gps coordinate out of range: lat={lat}, long={long}"
            )));
        }
        Ok(Self { lat, long })
    }

    /// Parse `"lat long"` or `"lat, long"`.
    pub fn parse(s: &str) -> PhotostoryResult<Self> {
        let invalid =
            || PhotostoryError::validation(format!("invalid latitude, longitude: '{s}'"));
        let mut parts = s.split_whitespace();
        let (Some(lat), Some(long), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        let lat = lat
            .trim_end_matches(',')
            .parse::<f64>()
            .map_err(|_| invalid())?;
        let long = long.parse::<f64>().map_err(|_| invalid())?;
        Self::new(lat, long)
    }

    /// Equirectangular projection onto a map of `map_size`.
    ///
    /// `y` grows with latitude (south edge at 0), matching the map texture's frame.
    pub fn to_map_xy(self, map_size: Size) -> Point {
        Point::new(
            map_size.width * (self.long + 180.0) / 360.0,
            map_size.height * (self.lat + 90.0) / 180.0,
        )
    }
}

/// World map placement for a canvas: the largest map that fits the canvas width and
/// height, horizontally aligned with the canvas and placed below the slides
/// (`y = 1.5 · canvas.height`, y-down).
pub fn world_map_rect(canvas: &Rectangle) -> Rectangle {
    let mut map = canvas.best_fit(&Rectangle::from_size(WORLD_MAP_SIZE));
    map.y = 1.5 * canvas.height;
    map
}

/// Length of the polyline through `points`.
pub fn route_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

#[cfg(test)]
#[path = "../../tests/unit/story/gps.rs"]
mod tests;
