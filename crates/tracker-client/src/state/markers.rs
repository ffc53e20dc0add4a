//! Renderable marker types
//!
//! What the rendering collaborator consumes: airport markers, flight routes,
//! live plane markers, and transient-event log entries.

use serde::{Deserialize, Serialize};
use tracker_core::{Airport, Flight, GeoCoordinate, Plane, PlaneStatus};

/// Route weight for an ordinary in-progress flight
pub const ROUTE_WEIGHT_LIGHT: u32 = 3;

/// Route weight for take-off and landed flights
pub const ROUTE_WEIGHT_HEAVY: u32 = 6;

/// Icon shown for a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerIcon {
    /// Departure airport
    Departure,
    /// Destination airport
    Destination,
    /// Plane in flight
    Plane,
    /// Crashed-plane indicator
    Crashed,
}

impl MarkerIcon {
    /// Icon for a live plane with the given status
    #[must_use]
    pub const fn for_plane_status(status: PlaneStatus) -> Self {
        match status {
            PlaneStatus::Crashed => Self::Crashed,
            _ => Self::Plane,
        }
    }
}

/// Polyline color for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteColor {
    /// Ordinary in-progress route
    Blue,
    /// Route of a flight currently taking off
    Red,
    /// Route of a landed flight
    Green,
}

/// An airport marker, deduplicated by coordinate key
///
/// First writer for a coordinate wins; markers accumulate for the whole
/// session and are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportMarker {
    pub position: GeoCoordinate,
    pub icon: MarkerIcon,
    pub name: String,
    pub city: String,
    pub country: String,
}

impl AirportMarker {
    /// Build a marker from one end of a flight
    #[must_use]
    pub fn from_airport(airport: &Airport, icon: MarkerIcon) -> Self {
        Self {
            position: airport.location,
            icon,
            name: airport.name.clone(),
            city: airport.city.name.clone(),
            country: airport.city.country.name.clone(),
        }
    }
}

/// A flight's two-point route polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRoute {
    /// Departure then destination coordinates
    pub positions: [GeoCoordinate; 2],
    pub color: RouteColor,
    pub weight: u32,
    /// Sticky once `landed`: later recomputes must not regress it
    pub status: PlaneStatus,
}

impl FlightRoute {
    /// Derive a route from a flight and its plane's current status
    ///
    /// `take-off` renders heavy and red; everything else light and blue.
    /// With no plane known the status defaults to in-progress.
    #[must_use]
    pub fn derive(flight: &Flight, plane_status: Option<PlaneStatus>) -> Self {
        let status = plane_status.unwrap_or(PlaneStatus::InProgress);
        let (color, weight) = if status == PlaneStatus::TakeOff {
            (RouteColor::Red, ROUTE_WEIGHT_HEAVY)
        } else {
            (RouteColor::Blue, ROUTE_WEIGHT_LIGHT)
        };

        Self {
            positions: [flight.departure.location, flight.destination.location],
            color,
            weight,
            status,
        }
    }

    /// Whether the route reached its terminal landed state
    #[must_use]
    pub fn is_landed(&self) -> bool {
        self.status == PlaneStatus::Landed
    }

    /// Mark the route landed (terminal)
    pub fn mark_landed(&mut self) {
        self.color = RouteColor::Green;
        self.weight = ROUTE_WEIGHT_HEAVY;
        self.status = PlaneStatus::Landed;
    }
}

/// A live plane marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneMarker {
    pub plane: Plane,
    pub icon: MarkerIcon,
}

impl PlaneMarker {
    /// Build a marker from a plane snapshot, deriving the icon from status
    #[must_use]
    pub fn from_plane(plane: Plane) -> Self {
        let icon = MarkerIcon::for_plane_status(plane.status);
        Self { plane, icon }
    }
}

/// Kind of a transient event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransientKind {
    TakeOff,
    Landing,
    Crashed,
}

impl TransientKind {
    /// Get the wire string for this kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TakeOff => "take-off",
            Self::Landing => "landing",
            Self::Crashed => "crashed",
        }
    }
}

impl std::fmt::Display for TransientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transient event as recorded in the ordered event log
///
/// Consumed once by the reducer; retained here only for downstream overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransientEvent {
    pub kind: TransientKind,
    pub flight_id: String,
    pub position: Option<GeoCoordinate>,
}

impl TransientEvent {
    /// Create a new transient event
    #[must_use]
    pub fn new(kind: TransientKind, flight_id: impl Into<String>, position: Option<GeoCoordinate>) -> Self {
        Self {
            kind,
            flight_id: flight_id.into(),
            position,
        }
    }
}
