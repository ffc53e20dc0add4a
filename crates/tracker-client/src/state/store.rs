//! Tracker state and the reducer
//!
//! All mutation flows through `TrackerState::apply`, one change at a time,
//! whether the source is a snapshot frame, a transient event, a user action,
//! or a timer fire. Each application runs to completion before the next.

use super::markers::{
    AirportMarker, FlightRoute, MarkerIcon, PlaneMarker, TransientEvent, TransientKind,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracker_core::{AirportKey, ChatMessage, Flight, Plane};

/// A single state change fed through the reducer
#[derive(Debug, Clone)]
pub enum StateChange {
    /// Full-replacement flights snapshot
    FlightsSnapshot(HashMap<String, Flight>),
    /// Incremental plane snapshot (latest wins per flight id)
    PlaneUpdate(Plane),
    /// Transient take-off/landing/crash event
    Transient(TransientEvent),
    /// Inbound chat message
    Chat(ChatMessage),
    /// Connectivity flag from the connection layer
    ConnectionChanged(bool),
    /// Guarded removal of a crash marker, fired by the expiry scheduler
    ExpireCrashMarker {
        flight_id: String,
        /// Icon captured at arming time; removal proceeds only if unchanged
        expected_icon: MarkerIcon,
    },
}

/// The derived render state
#[derive(Debug, Default)]
pub struct TrackerState {
    connected: bool,
    flights: HashMap<String, Flight>,
    planes: HashMap<String, Plane>,
    airports: HashMap<AirportKey, AirportMarker>,
    routes: HashMap<String, FlightRoute>,
    live_planes: HashMap<String, PlaneMarker>,
    events: Vec<TransientEvent>,
    messages: Vec<ChatMessage>,
}

impl TrackerState {
    /// Create an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one change and rederive whatever it affects
    pub fn apply(&mut self, change: StateChange) {
        match change {
            StateChange::FlightsSnapshot(flights) => {
                tracing::debug!(flights = flights.len(), "applying flights snapshot");
                self.flights = flights;
                self.rederive();
            }
            StateChange::PlaneUpdate(plane) => {
                tracing::trace!(flight_id = %plane.flight_id, status = %plane.status, "applying plane update");
                self.planes.insert(plane.flight_id.clone(), plane);
                self.rederive();
            }
            StateChange::Transient(event) => self.apply_transient(event),
            StateChange::Chat(message) => {
                tracing::trace!(sender = %message.name, "chat message appended");
                self.messages.push(message);
            }
            StateChange::ConnectionChanged(connected) => {
                tracing::debug!(connected = connected, "connectivity changed");
                self.connected = connected;
            }
            StateChange::ExpireCrashMarker {
                flight_id,
                expected_icon,
            } => self.expire_crash_marker(&flight_id, expected_icon),
        }
    }

    /// Recompute routes and live planes from the raw maps
    ///
    /// Airport markers accumulate: a coordinate key is written only the
    /// first time it appears and never deleted afterwards.
    fn rederive(&mut self) {
        let mut routes = HashMap::with_capacity(self.flights.len());
        let mut live_planes = HashMap::with_capacity(self.planes.len());

        for (flight_id, flight) in &self.flights {
            self.airports
                .entry(flight.departure_key())
                .or_insert_with(|| {
                    AirportMarker::from_airport(&flight.departure, MarkerIcon::Departure)
                });
            self.airports
                .entry(flight.destination_key())
                .or_insert_with(|| {
                    AirportMarker::from_airport(&flight.destination, MarkerIcon::Destination)
                });

            // Landed is terminal: keep the stored route untouched
            match self.routes.get(flight_id) {
                Some(route) if route.is_landed() => {
                    routes.insert(flight_id.clone(), route.clone());
                }
                _ => {
                    let plane_status = self.planes.get(flight_id).map(|p| p.status);
                    routes.insert(flight_id.clone(), FlightRoute::derive(flight, plane_status));
                }
            }

            // Planes with no corresponding flight are not shown
            if let Some(plane) = self.planes.get(flight_id) {
                live_planes.insert(flight_id.clone(), PlaneMarker::from_plane(plane.clone()));
            }
        }

        self.routes = routes;
        self.live_planes = live_planes;
    }

    /// Apply a transient event, then record it in the ordered log
    ///
    /// Missing-reference lookups are expected with partial data and are
    /// silent no-ops.
    fn apply_transient(&mut self, event: TransientEvent) {
        match event.kind {
            TransientKind::Landing => {
                if let Some(route) = self.routes.get_mut(&event.flight_id) {
                    route.mark_landed();
                    tracing::debug!(flight_id = %event.flight_id, "route marked landed");
                } else {
                    tracing::trace!(flight_id = %event.flight_id, "landing for unknown route");
                }
            }
            TransientKind::Crashed => {
                if let Some(marker) = self.live_planes.get_mut(&event.flight_id) {
                    marker.icon = MarkerIcon::Crashed;
                    tracing::debug!(flight_id = %event.flight_id, "plane marked crashed");
                } else {
                    tracing::trace!(flight_id = %event.flight_id, "crash for unknown plane");
                }
            }
            // Take-off is log-only; the snapshot recompute already reflects
            // the plane status
            TransientKind::TakeOff => {}
        }

        self.events.push(event);
    }

    /// Remove a crash marker if its icon is still the one captured at arming
    fn expire_crash_marker(&mut self, flight_id: &str, expected_icon: MarkerIcon) {
        match self.live_planes.get(flight_id) {
            Some(marker) if marker.icon == expected_icon => {
                self.live_planes.remove(flight_id);
                tracing::debug!(flight_id = %flight_id, "crash marker expired");
            }
            Some(_) => {
                tracing::trace!(flight_id = %flight_id, "crash marker superseded; expiry skipped");
            }
            None => {}
        }
    }

    // === Accessors ===

    /// Connectivity flag
    pub fn connected(&self) -> bool {
        self.connected
    }

    /// Raw flights map from the latest snapshot
    pub fn flights(&self) -> &HashMap<String, Flight> {
        &self.flights
    }

    /// Raw plane map
    pub fn planes(&self) -> &HashMap<String, Plane> {
        &self.planes
    }

    /// Accumulated airport markers
    pub fn airports(&self) -> &HashMap<AirportKey, AirportMarker> {
        &self.airports
    }

    /// Derived flight routes
    pub fn routes(&self) -> &HashMap<String, FlightRoute> {
        &self.routes
    }

    /// Live plane markers
    pub fn live_planes(&self) -> &HashMap<String, PlaneMarker> {
        &self.live_planes
    }

    /// Ordered transient-event log
    pub fn events(&self) -> &[TransientEvent] {
        &self.events
    }

    /// Chat log, in arrival order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

/// Cloneable handle to the state, shared between the connection task, the
/// scheduler, and the consumer
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Arc<RwLock<TrackerState>>,
}

impl SharedState {
    /// Create a handle around an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one change through the reducer
    pub fn apply(&self, change: StateChange) {
        self.inner.write().apply(change);
    }

    /// Connectivity flag
    pub fn connected(&self) -> bool {
        self.inner.read().connected()
    }

    /// Snapshot of the flights map
    pub fn flights(&self) -> HashMap<String, Flight> {
        self.inner.read().flights().clone()
    }

    /// Flights ordered by departure airport name, then destination name
    pub fn sorted_flights(&self) -> Vec<Flight> {
        let mut flights: Vec<Flight> = self.inner.read().flights().values().cloned().collect();
        flights.sort_by(|a, b| {
            a.departure
                .name
                .cmp(&b.departure.name)
                .then_with(|| a.destination.name.cmp(&b.destination.name))
        });
        flights
    }

    /// Snapshot of the plane map
    pub fn planes(&self) -> HashMap<String, Plane> {
        self.inner.read().planes().clone()
    }

    /// Snapshot of the accumulated airport markers
    pub fn airports(&self) -> HashMap<AirportKey, AirportMarker> {
        self.inner.read().airports().clone()
    }

    /// Snapshot of the derived routes
    pub fn routes(&self) -> HashMap<String, FlightRoute> {
        self.inner.read().routes().clone()
    }

    /// Snapshot of the live plane markers
    pub fn live_planes(&self) -> HashMap<String, PlaneMarker> {
        self.inner.read().live_planes().clone()
    }

    /// Snapshot of the transient-event log
    pub fn events(&self) -> Vec<TransientEvent> {
        self.inner.read().events().to_vec()
    }

    /// Snapshot of the chat log
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.inner.read().messages().to_vec()
    }
}
