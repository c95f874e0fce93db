use serde::{Deserialize, Serialize};

/// WGS84 coordinate in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }
}

impl From<geo_types::Coord<f64>> for GeoPoint {
    fn from(coord: geo_types::Coord<f64>) -> Self {
        GeoPoint {
            lat: coord.y,
            lng: coord.x,
        }
    }
}
