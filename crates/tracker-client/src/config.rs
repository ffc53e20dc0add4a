//! Client configuration
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present). Only the endpoint URL is required; everything else has
//! defaults.

use std::env;
use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket endpoint of the simulation feed
    pub url: String,

    /// Identity sent in the join handshake
    pub user_id: String,

    /// Display name sent in the join handshake
    pub username: String,

    /// Delay between reconnect attempts, in milliseconds
    pub reconnect_delay_ms: u64,

    /// How long a crashed plane stays on the map, in seconds
    pub crash_marker_window_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            url: env::var("TRACKER_WS_URL").map_err(|_| ConfigError::MissingVar("TRACKER_WS_URL"))?,
            user_id: env::var("TRACKER_USER_ID")
                .map_err(|_| ConfigError::MissingVar("TRACKER_USER_ID"))?,
            username: env::var("TRACKER_USERNAME").unwrap_or_else(|_| default_username()),
            reconnect_delay_ms: env::var("TRACKER_RECONNECT_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_reconnect_delay_ms),
            crash_marker_window_secs: env::var("TRACKER_CRASH_MARKER_WINDOW_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_crash_marker_window_secs),
        })
    }

    /// Create a configuration with defaults for everything but the endpoint
    /// and identity
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        user_id: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            user_id: user_id.into(),
            username: username.into(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
            crash_marker_window_secs: default_crash_marker_window_secs(),
        }
    }

    /// Reconnect delay as a `Duration`
    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    /// Crash-marker window as a `Duration`
    #[must_use]
    pub fn crash_marker_window(&self) -> Duration {
        Duration::from_secs(self.crash_marker_window_secs)
    }
}

// Default value functions
fn default_username() -> String {
    "observer".to_string()
}

fn default_reconnect_delay_ms() -> u64 {
    3000
}

fn default_crash_marker_window_secs() -> u64 {
    60
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}
