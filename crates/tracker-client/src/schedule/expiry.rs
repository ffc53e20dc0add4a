//! Crash-marker expiry scheduler
//!
//! Arms a one-shot timer per crash event. The timer is not cancellable; it
//! carries the flight id and the indicator captured at arming time, and the
//! reducer re-reads the current marker on fire, removing it only if the
//! indicator is unchanged. A marker that was reset for a different status in
//! the interim survives.

use crate::state::{MarkerIcon, SharedState, StateChange};
use std::time::Duration;

/// How long a crashed plane stays on the map before disappearing
pub const DEFAULT_CRASH_MARKER_WINDOW: Duration = Duration::from_secs(60);

/// Schedules guarded removals of crash markers
#[derive(Debug, Clone)]
pub struct ExpiryScheduler {
    state: SharedState,
    window: Duration,
}

impl ExpiryScheduler {
    /// Create a scheduler feeding the given state
    #[must_use]
    pub fn new(state: SharedState, window: Duration) -> Self {
        Self { state, window }
    }

    /// Arm a one-shot expiry for a flight's crash marker
    pub fn schedule_expiry(&self, flight_id: impl Into<String>) {
        let flight_id = flight_id.into();
        let state = self.state.clone();
        let window = self.window;
        // The indicator the marker must still show at fire time
        let expected_icon = MarkerIcon::Crashed;

        tracing::debug!(
            flight_id = %flight_id,
            window_secs = window.as_secs(),
            "crash marker expiry armed"
        );

        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            state.apply(StateChange::ExpireCrashMarker {
                flight_id,
                expected_icon,
            });
        });
    }
}
