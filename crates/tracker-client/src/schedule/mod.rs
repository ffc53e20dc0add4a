//! Ephemeral effects
//!
//! Delayed state mutations that self-cancel when superseded.

mod expiry;

pub use expiry::{ExpiryScheduler, DEFAULT_CRASH_MARKER_WINDOW};
