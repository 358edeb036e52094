//! Geographic primitives: coordinate validation and great-circle distance.
//!
//! Distances use the haversine formula on a mean-radius sphere. Error
//! versus an ellipsoid is under 0.5% at directory scale, which is well
//! inside the display rounding of the consumers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
///
/// Plain value type: construction does not validate, so records from
/// real-world feeds (which contain out-of-range junk) can be represented
/// and rejected at use sites via [`GeoPoint::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Construct and validate in one step.
    pub fn checked(lat: f64, lon: f64) -> Result<Self, GeoError> {
        let point = Self { lat, lon };
        point.validate()?;
        Ok(point)
    }

    /// True if both components are in range. NaN fails both range checks.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    pub fn validate(&self) -> Result<(), GeoError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(GeoError::InvalidCoordinate { lat: self.lat, lon: self.lon })
        }
    }

    /// Great-circle distance to another point in kilometers.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(*self, *other)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// Coordinate errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoError {
    /// Latitude outside [-90, 90] or longitude outside [-180, 180].
    InvalidCoordinate { lat: f64, lon: f64 },
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate { lat, lon } => write!(
                f,
                "Invalid coordinate ({}, {}): latitude must be in -90..90, longitude in -180..180",
                lat, lon
            ),
        }
    }
}

impl std::error::Error for GeoError {}

/// Haversine great-circle distance between two points, in kilometers.
///
/// Symmetric and non-negative; finite for any in-range input.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}
