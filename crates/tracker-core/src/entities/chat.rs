//! Chat message entity

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A chat message as delivered by the feed
///
/// Messages are append-only; ordering is arrival order, not timestamp order.
/// `date` is kept as the raw wire string so an unparseable timestamp never
/// poisons the frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Display name of the sender
    pub name: String,

    pub content: String,

    /// Timestamp string as sent by the server
    pub date: String,

    /// Severity tag for system messages (e.g. "warn")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl ChatMessage {
    /// Parse the wire timestamp, if it is valid RFC 3339
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.date).ok()
    }

    /// Whether this is a warning-level system message
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.level.as_deref() == Some("warn")
    }
}
