use thiserror::Error;

use crate::geopoint::GeoPoint;

/// Google Directions overview polylines are encoded with 5 decimal places.
const GOOGLE_POLYLINE_PRECISION: u32 = 5;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Invalid polyline: {0}")]
    InvalidPolyline(String),
}

pub fn decode_route_polyline(encoded: &str) -> Result<Vec<GeoPoint>, RouteError> {
    let line = polyline::decode_polyline(encoded, GOOGLE_POLYLINE_PRECISION)
        .map_err(|error| RouteError::InvalidPolyline(error.to_string()))?;

    Ok(line.0.into_iter().map(GeoPoint::from).collect())
}
