//! Geographic coordinates and the coordinate-derived airport identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair as transmitted by the feed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub long: f64,
}

impl GeoCoordinate {
    /// Create a new coordinate
    #[must_use]
    pub const fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }

    /// Derive the airport identity for this location
    #[must_use]
    pub fn airport_key(&self) -> AirportKey {
        AirportKey::from_coordinate(*self)
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.long)
    }
}

/// Coordinate-derived airport identity
///
/// Airports are not transmitted as their own entities; they are deduplicated
/// by the composite `"{lat}-{long}"` key of their location. Two airports at
/// the exact same printed coordinates share one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AirportKey(String);

impl AirportKey {
    /// Derive the key from a location
    #[must_use]
    pub fn from_coordinate(location: GeoCoordinate) -> Self {
        Self(format!("{}-{}", location.lat, location.long))
    }

    /// Get the raw key string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AirportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
