//! Flight entity - a scheduled flight between two airports

use crate::value_objects::{AirportKey, GeoCoordinate};
use serde::{Deserialize, Serialize};

/// A flight as transmitted in a `flights` snapshot
///
/// Flights are refreshed wholesale by each snapshot; they are never patched
/// field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: String,
    pub departure: Airport,
    pub destination: Airport,
}

impl Flight {
    /// Airport identity for the departure end
    #[must_use]
    pub fn departure_key(&self) -> AirportKey {
        self.departure.location.airport_key()
    }

    /// Airport identity for the destination end
    #[must_use]
    pub fn destination_key(&self) -> AirportKey {
        self.destination.location.airport_key()
    }
}

/// An airport reference embedded in a flight
///
/// Airports are not first-class entities on the wire; each flight carries its
/// own copy of both endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub name: String,
    pub city: City,
    pub location: GeoCoordinate,
}

/// City of an airport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country: Country,
}

/// Country of a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
}
