//! # tracker-client
//!
//! Event-stream client for the flight simulation feed: connection lifecycle
//! with automatic recovery, typed event dispatch, and reduction of the raw
//! entity/event stream into stable renderable collections.

pub mod client;
pub mod config;
pub mod connection;
pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod schedule;
pub mod state;
pub mod telemetry;

pub use client::FlightTracker;
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
