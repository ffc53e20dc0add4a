//! Connection manager
//!
//! Owns the single WebSocket connection to the feed endpoint: connect /
//! send / disconnect, frame decode, and the reconnect-with-retry policy.
//! Any closure not initiated by `disconnect()` schedules a retry after a
//! fixed delay; there is no backoff and no cap on attempts.

use crate::dispatch::{ClientEvent, EventDispatcher};
use crate::error::{ClientError, ClientResult};
use crate::protocol::{
    should_retry, ClientFrame, CloseCode, EventType, ABNORMAL_CLOSURE, NORMAL_CLOSURE,
};
use futures_util::{SinkExt, StreamExt};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode as WsCloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// Channel buffer size for outgoing frames
const OUTBOUND_BUFFER_SIZE: usize = 100;

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// No connection and no attempt in progress
    Disconnected,
    /// Attempting to establish (or waiting out a retry delay)
    Connecting,
    /// Connection established; sends are accepted
    Open,
}

/// Commands drained by the socket task
enum OutboundCommand {
    /// Serialize and transmit a frame
    Frame(ClientFrame),
    /// Close with the normal-closure code
    Close,
}

/// Manages the single connection to the feed endpoint
pub struct ConnectionManager {
    /// Endpoint URL
    url: String,

    /// Delay between retry attempts
    reconnect_delay: Duration,

    /// Dispatcher receiving decoded frames and synthetic open/closed events
    dispatcher: Arc<EventDispatcher>,

    /// Current connection state
    state: RwLock<ConnectionState>,

    /// Sender for the active socket task, present only while a socket exists
    outbound: RwLock<Option<mpsc::Sender<OutboundCommand>>>,

    /// Cleared by `disconnect()` to stop the retry loop
    retry_enabled: AtomicBool,

    /// Bumped by each `connect()`; stale socket tasks observe the change and exit
    generation: AtomicU64,
}

impl ConnectionManager {
    /// Create a new manager for the given endpoint
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        reconnect_delay: Duration,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        Self {
            url: url.into(),
            reconnect_delay,
            dispatcher,
            state: RwLock::new(ConnectionState::Disconnected),
            outbound: RwLock::new(None),
            retry_enabled: AtomicBool::new(true),
            generation: AtomicU64::new(0),
        }
    }

    /// Create a new manager wrapped in Arc
    #[must_use]
    pub fn new_shared(
        url: impl Into<String>,
        reconnect_delay: Duration,
        dispatcher: Arc<EventDispatcher>,
    ) -> Arc<Self> {
        Arc::new(Self::new(url, reconnect_delay, dispatcher))
    }

    /// Get the current connection state
    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    /// Register a handler for an event type
    ///
    /// Multiple handlers per type are allowed; all are invoked in
    /// registration order whenever a matching event arrives.
    pub fn on<F>(&self, event_type: EventType, handler: F)
    where
        F: Fn(&ClientEvent) + Send + Sync + 'static,
    {
        self.dispatcher.on(event_type, handler);
    }

    /// The dispatcher receiving this connection's events
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Whether the connection is open for sends
    pub fn is_open(&self) -> bool {
        self.state() == ConnectionState::Open
    }

    /// Open the connection
    ///
    /// Idempotent: a no-op while a connection is open or an attempt (or retry
    /// wait) is in progress. Otherwise spawns the socket task, which emits an
    /// `open` event on each successful establishment.
    pub fn connect(self: &Arc<Self>) {
        {
            let mut state = self.state.write();
            if *state != ConnectionState::Disconnected {
                tracing::debug!(state = ?*state, "connect ignored; already active");
                return;
            }
            *state = ConnectionState::Connecting;
        }

        self.retry_enabled.store(true, Ordering::SeqCst);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::info!(url = %self.url, "connecting");

        let manager = Arc::clone(self);
        tokio::spawn(async move {
            manager.run(generation).await;
        });
    }

    /// Transmit a frame
    ///
    /// Only valid while the connection is open; otherwise the frame is
    /// dropped and an error returned. Frames are never queued for later.
    pub fn send(&self, frame: ClientFrame) -> ClientResult<()> {
        if !self.is_open() {
            tracing::warn!("send rejected; connection is not open");
            return Err(ClientError::NotConnected);
        }

        let guard = self.outbound.read();
        let Some(sender) = guard.as_ref() else {
            tracing::warn!("send rejected; no active socket");
            return Err(ClientError::NotConnected);
        };

        sender
            .try_send(OutboundCommand::Frame(frame))
            .map_err(|_| ClientError::SendFailed)
    }

    /// Close the connection with the normal-closure code
    ///
    /// Suppresses the retry loop; this is the only way to stop it.
    pub fn disconnect(&self) {
        self.retry_enabled.store(false, Ordering::SeqCst);

        let sender = self.outbound.read().as_ref().cloned();
        if let Some(sender) = sender {
            tracing::info!("disconnecting");
            if sender.try_send(OutboundCommand::Close).is_err() {
                tracing::debug!("close command dropped; socket already closing");
            }
        } else {
            // No active socket: stop a pending retry wait, if any
            *self.state.write() = ConnectionState::Disconnected;
            tracing::debug!("disconnect with no active connection");
        }
    }

    /// Whether this loop instance was cancelled by a disconnect or a newer
    /// `connect()` call
    fn cancelled(&self, generation: u64) -> bool {
        !self.retry_enabled.load(Ordering::SeqCst)
            || self.generation.load(Ordering::SeqCst) != generation
    }

    /// Connect-and-retry loop, one instance per `connect()` call
    async fn run(&self, generation: u64) {
        loop {
            match connect_async(self.url.as_str()).await {
                Ok((socket, _)) => {
                    // A disconnect may have landed while the attempt was in
                    // flight; drop the socket instead of opening
                    if self.cancelled(generation) {
                        drop(socket);
                        break;
                    }

                    let (sender, receiver) = mpsc::channel(OUTBOUND_BUFFER_SIZE);
                    *self.outbound.write() = Some(sender);
                    *self.state.write() = ConnectionState::Open;
                    tracing::info!(url = %self.url, "connection established");
                    self.dispatcher.emit(&ClientEvent::Open);

                    let close_code = self.drive(socket, receiver).await;

                    *self.outbound.write() = None;
                    *self.state.write() = ConnectionState::Disconnected;
                    self.dispatcher.emit(&ClientEvent::Closed { code: close_code });

                    if !should_retry(close_code) {
                        tracing::info!("connection closed normally");
                        return;
                    }

                    tracing::warn!(
                        code = close_code,
                        reason = CloseCode::from_u16(close_code).map(CloseCode::description),
                        "connection closed abnormally"
                    );
                }
                Err(e) => {
                    tracing::warn!(url = %self.url, error = %e, "failed to reach endpoint");
                }
            }

            if self.cancelled(generation) {
                break;
            }

            *self.state.write() = ConnectionState::Connecting;
            tracing::info!(
                delay_ms = self.reconnect_delay.as_millis() as u64,
                "scheduling reconnect"
            );
            tokio::time::sleep(self.reconnect_delay).await;

            if self.cancelled(generation) {
                break;
            }
        }

        if self.generation.load(Ordering::SeqCst) == generation {
            *self.state.write() = ConnectionState::Disconnected;
        }
    }

    /// Pump one established socket until it closes; returns the close code
    async fn drive(
        &self,
        socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
        mut receiver: mpsc::Receiver<OutboundCommand>,
    ) -> u16 {
        let (mut sink, mut stream) = socket.split();
        let mut initiated_close = false;

        loop {
            tokio::select! {
                command = receiver.recv() => match command {
                    Some(OutboundCommand::Frame(frame)) => match frame.to_json() {
                        Ok(json) => {
                            if let Err(e) = sink.send(Message::Text(json)).await {
                                tracing::warn!(error = %e, "failed to send frame");
                                return ABNORMAL_CLOSURE;
                            }
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "failed to serialize outbound frame");
                        }
                    },
                    Some(OutboundCommand::Close) => {
                        initiated_close = true;
                        let frame = CloseFrame {
                            code: WsCloseCode::Normal,
                            reason: "client disconnect".into(),
                        };
                        if sink.send(Message::Close(Some(frame))).await.is_err() {
                            return NORMAL_CLOSURE;
                        }
                    }
                    None => return ABNORMAL_CLOSURE,
                },
                inbound = stream.next() => match inbound {
                    Some(Ok(Message::Text(text))) => self.handle_text_frame(&text),
                    Some(Ok(Message::Ping(_) | Message::Pong(_))) => {
                        tracing::trace!("keepalive frame");
                    }
                    Some(Ok(Message::Close(frame))) => {
                        let code = frame.map_or(ABNORMAL_CLOSURE, |f| u16::from(f.code));
                        tracing::debug!(code = code, "close frame received");
                        return if initiated_close { NORMAL_CLOSURE } else { code };
                    }
                    Some(Ok(_)) => {
                        tracing::debug!("unsupported frame type ignored");
                    }
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "transport error");
                        return if initiated_close { NORMAL_CLOSURE } else { ABNORMAL_CLOSURE };
                    }
                    None => {
                        tracing::debug!("stream ended without close frame");
                        return if initiated_close { NORMAL_CLOSURE } else { ABNORMAL_CLOSURE };
                    }
                }
            }
        }
    }

    /// Decode one text frame and fan it out
    ///
    /// A decode failure is isolated to this frame.
    fn handle_text_frame(&self, text: &str) {
        match crate::protocol::ServerFrame::from_json(text) {
            Ok(frame) => {
                tracing::trace!(frame_type = %frame.event_type(), "frame received");
                self.dispatcher.emit(&ClientEvent::Frame(frame));
            }
            Err(e) => {
                tracing::debug!(error = %e, "dropping malformed frame");
            }
        }
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("url", &self.url)
            .field("state", &self.state())
            .finish()
    }
}
