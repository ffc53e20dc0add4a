//! Frame definitions
//!
//! Every frame is a self-describing JSON object whose `type` field selects
//! the payload shape.

use super::EventType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracker_core::{ChatMessage, Flight, GeoCoordinate, Plane};

/// Frames sent by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientFrame {
    /// Identity announcement, sent once per connection establishment
    Join { id: String, username: String },
    /// Chat message from the local user
    Chat { content: String },
}

impl ClientFrame {
    /// Create a join handshake frame
    #[must_use]
    pub fn join(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self::Join {
            id: id.into(),
            username: username.into(),
        }
    }

    /// Create a chat frame
    #[must_use]
    pub fn chat(content: impl Into<String>) -> Self {
        Self::Chat {
            content: content.into(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Frames received from the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerFrame {
    /// Full-replacement snapshot of all flights
    Flights { flights: HashMap<String, Flight> },

    /// Incremental snapshot for a single plane
    Plane { plane: Plane },

    /// A plane left its departure airport
    TakeOff {
        flight_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lat: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        long: Option<f64>,
    },

    /// A plane arrived at its destination
    Landing {
        flight_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lat: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        long: Option<f64>,
    },

    /// A plane went down
    Crashed { flight_id: String },

    /// Chat message broadcast
    Message { message: ChatMessage },
}

impl ServerFrame {
    /// Deserialize from a JSON text frame
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The dispatch key for this frame
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::Flights { .. } => EventType::Flights,
            Self::Plane { .. } => EventType::Plane,
            Self::TakeOff { .. } => EventType::TakeOff,
            Self::Landing { .. } => EventType::Landing,
            Self::Crashed { .. } => EventType::Crashed,
            Self::Message { .. } => EventType::Message,
        }
    }

    /// Event coordinates for transient frames that carry them
    #[must_use]
    pub fn position(&self) -> Option<GeoCoordinate> {
        match self {
            Self::TakeOff { lat, long, .. } | Self::Landing { lat, long, .. } => {
                match (lat, long) {
                    (Some(lat), Some(long)) => Some(GeoCoordinate::new(*lat, *long)),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ServerFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ServerFrame({})", self.event_type())
    }
}
