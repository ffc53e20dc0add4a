//! Plane entity - the live position and status of a flight in the air

use crate::value_objects::GeoCoordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A live plane snapshot keyed by its owning flight
///
/// The feed sends partial payloads; only `flight_id` is required. The latest
/// snapshot for a flight id wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub flight_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<GeoCoordinate>,

    #[serde(default)]
    pub status: PlaneStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline: Option<Airline>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captain: Option<String>,

    #[serde(rename = "ETA", default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<String>,
}

impl Plane {
    /// Create a minimal plane snapshot (remaining fields unset)
    #[must_use]
    pub fn new(flight_id: impl Into<String>, status: PlaneStatus) -> Self {
        Self {
            flight_id: flight_id.into(),
            position: None,
            status,
            airline: None,
            captain: None,
            eta: None,
            arrival: None,
        }
    }
}

/// Airline operating a flight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airline {
    pub name: String,
}

/// Enumerated plane status as transmitted on the wire
///
/// Unrecognized strings decode to `Unknown` rather than failing the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaneStatus {
    /// Airborne, en route
    InProgress,
    /// Departing its origin airport
    TakeOff,
    /// Arrived at its destination
    Landed,
    /// Went down mid-flight
    Crashed,
    /// Anything the feed sends that we do not recognize
    #[default]
    #[serde(other)]
    Unknown,
}

impl PlaneStatus {
    /// Get the wire string for this status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::TakeOff => "take-off",
            Self::Landed => "landed",
            Self::Crashed => "crashed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PlaneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
