//! Derived render state
//!
//! Reducers fold the raw entity stream and the transient-event stream into
//! stable renderable collections.

mod markers;
mod store;

pub use markers::{
    AirportMarker, FlightRoute, MarkerIcon, PlaneMarker, RouteColor, TransientEvent,
    TransientKind, ROUTE_WEIGHT_HEAVY, ROUTE_WEIGHT_LIGHT,
};
pub use store::{SharedState, StateChange, TrackerState};
