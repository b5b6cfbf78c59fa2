//! Geographic coordinate type.

use std::fmt;

use serde::Serialize;

/// Error returned when constructing an invalid coordinate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A WGS84 position in decimal degrees.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180];
/// both are finite. Any `Coordinate` value is valid by construction.
///
/// # Examples
///
/// ```
/// use departure_board::domain::Coordinate;
///
/// let zurich = Coordinate::new(47.3782, 8.5402).unwrap();
/// assert_eq!(zurich.latitude(), 47.3782);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(InvalidCoordinate {
                reason: "latitude and longitude must be finite",
            });
        }

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.latitude, self.longitude)
    }
}
