//! Domain entities - the objects transmitted by the simulation feed

mod chat;
mod flight;
mod plane;

pub use chat::ChatMessage;
pub use flight::{Airport, City, Country, Flight};
pub use plane::{Airline, Plane, PlaneStatus};
