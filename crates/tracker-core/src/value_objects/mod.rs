//! Value objects - coordinate types and identity keys

mod coordinate;

pub use coordinate::{AirportKey, GeoCoordinate};
