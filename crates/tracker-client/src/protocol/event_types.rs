//! Client event types
//!
//! The keys of the dispatch table. Wire frames map to their `type`
//! discriminator; `open` and `closed` are synthesized by the connection
//! layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Event types routable through the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    /// Connection established (synthetic, not a wire frame)
    Open,
    /// Connection torn down (synthetic, not a wire frame)
    Closed,
    /// Full flights snapshot
    Flights,
    /// Incremental plane snapshot
    Plane,
    /// Take-off transient event
    TakeOff,
    /// Landing transient event
    Landing,
    /// Crash transient event
    Crashed,
    /// Chat message
    Message,
}

impl EventType {
    /// Get the string representation of the event type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Flights => "flights",
            Self::Plane => "plane",
            Self::TakeOff => "take-off",
            Self::Landing => "landing",
            Self::Crashed => "crashed",
            Self::Message => "message",
        }
    }

    /// Parse an event type from its wire string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            "flights" => Some(Self::Flights),
            "plane" => Some(Self::Plane),
            "take-off" => Some(Self::TakeOff),
            "landing" => Some(Self::Landing),
            "crashed" => Some(Self::Crashed),
            "message" => Some(Self::Message),
            _ => None,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
