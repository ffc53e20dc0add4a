//! # tracker-core
//!
//! Domain layer containing the entities and value objects shared by the wire
//! protocol and the derived render state. This crate has zero dependencies on
//! the transport (WebSocket, runtime, etc.).

pub mod entities;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Airline, Airport, ChatMessage, City, Country, Flight, Plane, PlaneStatus};
pub use value_objects::{AirportKey, GeoCoordinate};
