//! Geographic coordinates and great-circle distance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Error returned when constructing a coordinate outside the valid range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoord {
    reason: &'static str,
}

/// A WGS-84 latitude/longitude pair in degrees.
///
/// Values built with [`Coord::new`] are guaranteed to be finite and within
/// range. [`Coord::unchecked`] skips validation for callers that already
/// validated their input (or deliberately want NaN to flow through the
/// distance calculation).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lng: f64,
}

impl Coord {
    /// Create a validated coordinate.
    ///
    /// ```
    /// use relief_server::domain::Coord;
    ///
    /// assert!(Coord::new(35.681236, 139.767125).is_ok());
    /// assert!(Coord::new(91.0, 0.0).is_err());
    /// assert!(Coord::new(f64::NAN, 0.0).is_err());
    /// ```
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoord> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidCoord {
                reason: "latitude and longitude must be finite numbers",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoord {
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoord {
                reason: "longitude must be within [-180, 180]",
            });
        }
        Ok(Self { lat, lng })
    }

    /// Create a coordinate without range checks.
    pub const fn unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Haversine distance to `other` in kilometres.
    pub fn distance_km(self, other: Coord) -> f64 {
        distance_km(self.lat, self.lng, other.lat, other.lng)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Great-circle distance between two points given in degrees, in kilometres.
///
/// `a` is clamped to `[0, 1]` so floating-point overshoot near antipodal
/// points cannot push `asin` out of its domain. NaN inputs are not trapped:
/// they propagate to a NaN result.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (d_lon / 2.0).sin().powi(2);

    // f64::clamp passes NaN through unchanged
    let a = a.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}
