//! Flight tracker facade
//!
//! Owns the connection manager, dispatcher, state, and scheduler; wires
//! inbound events to the reducer; and exposes the read-only collections and
//! the two user actions (join, chat) to the rendering collaborator.

use crate::config::ClientConfig;
use crate::connection::ConnectionManager;
use crate::dispatch::{ClientEvent, EventDispatcher};
use crate::error::ClientResult;
use crate::protocol::{ClientFrame, EventType, ServerFrame};
use crate::schedule::ExpiryScheduler;
use crate::state::{
    AirportMarker, FlightRoute, PlaneMarker, SharedState, StateChange, TransientEvent,
    TransientKind,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracker_core::{AirportKey, ChatMessage, Flight, Plane};

/// Identity remembered for the join handshake
///
/// Re-sent once on every connection establishment, so a reconnect re-joins
/// automatically.
#[derive(Debug, Clone)]
struct JoinIdentity {
    user_id: String,
    username: String,
}

/// The event-stream client
///
/// Construct once, `connect()`, and read the derived collections from the
/// rendering layer. All reducers run to completion per event; the consumer
/// only ever observes consistent snapshots.
pub struct FlightTracker {
    connection: Arc<ConnectionManager>,
    state: SharedState,
    join_identity: Arc<RwLock<Option<JoinIdentity>>>,
}

impl FlightTracker {
    /// Create a tracker for the configured endpoint
    ///
    /// Registers one reducer per inbound event type; nothing happens until
    /// `connect()`.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let dispatcher = Arc::new(EventDispatcher::new());
        let state = SharedState::new();
        let scheduler = ExpiryScheduler::new(state.clone(), config.crash_marker_window());
        let connection =
            ConnectionManager::new_shared(config.url.clone(), config.reconnect_delay(), dispatcher);
        let join_identity = Arc::new(RwLock::new(None));

        let tracker = Self {
            connection,
            state,
            join_identity,
        };
        tracker.register_reducers(scheduler);
        tracker
    }

    /// Wire each event type to its reducer
    fn register_reducers(&self, scheduler: ExpiryScheduler) {
        {
            let state = self.state.clone();
            let join = Arc::clone(&self.join_identity);
            let connection = Arc::clone(&self.connection);
            self.connection.on(EventType::Open, move |_| {
                state.apply(StateChange::ConnectionChanged(true));

                // One handshake per establishment, if an identity was requested
                let identity = join.read().clone();
                if let Some(identity) = identity {
                    tracing::info!(user_id = %identity.user_id, "sending join handshake");
                    let frame =
                        ClientFrame::join(identity.user_id.as_str(), identity.username.as_str());
                    if let Err(e) = connection.send(frame) {
                        tracing::warn!(error = %e, "join handshake could not be sent");
                    }
                }
            });
        }

        {
            let state = self.state.clone();
            self.connection.on(EventType::Closed, move |_| {
                state.apply(StateChange::ConnectionChanged(false));
            });
        }

        {
            let state = self.state.clone();
            self.connection.on(EventType::Flights, move |event| {
                if let ClientEvent::Frame(ServerFrame::Flights { flights }) = event {
                    state.apply(StateChange::FlightsSnapshot(flights.clone()));
                }
            });
        }

        {
            let state = self.state.clone();
            self.connection.on(EventType::Plane, move |event| {
                if let ClientEvent::Frame(ServerFrame::Plane { plane }) = event {
                    state.apply(StateChange::PlaneUpdate(plane.clone()));
                }
            });
        }

        {
            let state = self.state.clone();
            self.connection.on(EventType::TakeOff, move |event| {
                let ClientEvent::Frame(frame) = event else { return };
                if let ServerFrame::TakeOff { flight_id, .. } = frame {
                    state.apply(StateChange::Transient(TransientEvent::new(
                        TransientKind::TakeOff,
                        flight_id.clone(),
                        frame.position(),
                    )));
                }
            });
        }

        {
            let state = self.state.clone();
            self.connection.on(EventType::Landing, move |event| {
                let ClientEvent::Frame(frame) = event else { return };
                if let ServerFrame::Landing { flight_id, .. } = frame {
                    state.apply(StateChange::Transient(TransientEvent::new(
                        TransientKind::Landing,
                        flight_id.clone(),
                        frame.position(),
                    )));
                }
            });
        }

        {
            let state = self.state.clone();
            self.connection.on(EventType::Crashed, move |event| {
                if let ClientEvent::Frame(ServerFrame::Crashed { flight_id }) = event {
                    state.apply(StateChange::Transient(TransientEvent::new(
                        TransientKind::Crashed,
                        flight_id.clone(),
                        None,
                    )));
                    scheduler.schedule_expiry(flight_id.clone());
                }
            });
        }

        {
            let state = self.state.clone();
            self.connection.on(EventType::Message, move |event| {
                if let ClientEvent::Frame(ServerFrame::Message { message }) = event {
                    state.apply(StateChange::Chat(message.clone()));
                }
            });
        }
    }

    // === Lifecycle ===

    /// Open the connection (idempotent)
    pub fn connect(&self) {
        self.connection.connect();
    }

    /// Close the connection intentionally, suppressing reconnect
    pub fn disconnect(&self) {
        self.connection.disconnect();
    }

    /// Register an additional handler for an event type
    ///
    /// Handlers run after the built-in reducers for the same type, in
    /// registration order.
    pub fn on<F>(&self, event_type: EventType, handler: F)
    where
        F: Fn(&ClientEvent) + Send + Sync + 'static,
    {
        self.connection.on(event_type, handler);
    }

    // === User actions ===

    /// Announce the local identity
    ///
    /// Sent immediately if the connection is open; otherwise deferred to the
    /// next establishment. Either way the identity is remembered and re-sent
    /// once per subsequent (re)establishment.
    pub fn join(&self, user_id: impl Into<String>, username: impl Into<String>) {
        let identity = JoinIdentity {
            user_id: user_id.into(),
            username: username.into(),
        };
        *self.join_identity.write() = Some(identity.clone());

        if self.connection.is_open() {
            let frame = ClientFrame::join(identity.user_id.as_str(), identity.username.as_str());
            match self.connection.send(frame) {
                Ok(()) => tracing::info!(user_id = %identity.user_id, "join handshake sent"),
                Err(e) => tracing::warn!(error = %e, "join handshake could not be sent"),
            }
        } else {
            tracing::debug!(user_id = %identity.user_id, "join deferred until connection opens");
        }
    }

    /// Send a chat message
    ///
    /// Fails (and drops the message) while the connection is not open.
    pub fn send_chat(&self, content: impl Into<String>) -> ClientResult<()> {
        self.connection.send(ClientFrame::chat(content))
    }

    // === Derived collections ===

    /// Whether the connection is currently open
    pub fn is_connected(&self) -> bool {
        self.state.connected()
    }

    /// Latest flights snapshot
    pub fn flights(&self) -> HashMap<String, Flight> {
        self.state.flights()
    }

    /// Flights ordered by departure airport name, then destination name
    pub fn sorted_flights(&self) -> Vec<Flight> {
        self.state.sorted_flights()
    }

    /// Latest plane map
    pub fn planes(&self) -> HashMap<String, Plane> {
        self.state.planes()
    }

    /// Accumulated airport markers
    pub fn airports(&self) -> HashMap<AirportKey, AirportMarker> {
        self.state.airports()
    }

    /// Derived flight routes
    pub fn routes(&self) -> HashMap<String, FlightRoute> {
        self.state.routes()
    }

    /// Live plane markers
    pub fn live_planes(&self) -> HashMap<String, PlaneMarker> {
        self.state.live_planes()
    }

    /// Ordered transient-event log
    pub fn events(&self) -> Vec<TransientEvent> {
        self.state.events()
    }

    /// Chat log, in arrival order
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.state.messages()
    }
}

impl std::fmt::Debug for FlightTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlightTracker")
            .field("connection", &self.connection)
            .field("connected", &self.is_connected())
            .finish()
    }
}
