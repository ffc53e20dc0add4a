//! Connection lifecycle
//!
//! One persistent duplex connection to the feed endpoint, with idempotent
//! connect, intentional disconnect, and a fixed-delay reconnect loop.

mod manager;

pub use manager::{ConnectionManager, ConnectionState};
