//! Event dispatch
//!
//! In-process publish/subscribe table routing decoded frames (and synthetic
//! connection events) to registered handlers.

mod dispatcher;

pub use dispatcher::{ClientEvent, EventDispatcher};
