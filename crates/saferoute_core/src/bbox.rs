use std::{fmt::Display, str::FromStr};

use thiserror::Error;

use crate::geopoint::GeoPoint;

/// Half-width in degrees of the box searched for incidents around a point.
pub const INCIDENT_SEARCH_BUFFER_DEGREES: f64 = 0.1;

#[derive(Debug, Error, PartialEq)]
pub enum BBoxParseError {
    #[error("expected 4 comma separated values, got {0}")]
    WrongArity(usize),

    #[error("invalid coordinate {0:?}")]
    InvalidNumber(String),

    #[error("minimum exceeds maximum")]
    Inverted,
}

/// Rectangle in lon/lat degrees, x is longitude and y is latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    min: geo_types::Coord<f64>,
    max: geo_types::Coord<f64>,
}

impl BBox {
    pub fn around(point: GeoPoint, buffer: f64) -> Self {
        BBox {
            min: geo_types::Coord {
                x: point.lng - buffer,
                y: point.lat - buffer,
            },
            max: geo_types::Coord {
                x: point.lng + buffer,
                y: point.lat + buffer,
            },
        }
    }
}

/// Renders as `minLon,minLat,maxLon,maxLat`.
impl Display for BBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

impl FromStr for BBox {
    type Err = BBoxParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|value| {
                let value = value.trim();
                value
                    .parse::<f64>()
                    .ok()
                    .filter(|number| number.is_finite())
                    .ok_or_else(|| BBoxParseError::InvalidNumber(value.to_string()))
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let &[min_x, min_y, max_x, max_y] = values.as_slice() else {
            return Err(BBoxParseError::WrongArity(values.len()));
        };

        if min_x > max_x || min_y > max_y {
            return Err(BBoxParseError::Inverted);
        }

        Ok(BBox {
            min: geo_types::Coord { x: min_x, y: min_y },
            max: geo_types::Coord { x: max_x, y: max_y },
        })
    }
}
