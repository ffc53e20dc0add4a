//! Test helpers for integration tests
//!
//! Provides a scripted WebSocket gateway that plays the role of the remote
//! simulation: it pushes arbitrary frames, closes with chosen codes, drops
//! the TCP connection outright, and records every frame the client sends.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;

/// Default timeout for waiting on gateway observations
const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Polling step for `wait_until`
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Commands consumed by the active gateway session
enum GatewayCommand {
    /// Push a text frame to the client
    Send(String),
    /// Perform a close handshake with the given code
    Close(u16),
    /// Drop the TCP connection without a close frame
    Drop,
}

/// Scripted gateway instance that manages its own accept loop
///
/// Sequential client connections (e.g. across a reconnect) are each served
/// in turn; commands issued while no session is active are consumed by the
/// next one.
pub struct ScriptedGateway {
    pub addr: SocketAddr,
    commands: mpsc::UnboundedSender<GatewayCommand>,
    client_frames: mpsc::UnboundedReceiver<serde_json::Value>,
    connections: mpsc::UnboundedReceiver<()>,
    _handle: JoinHandle<()>,
}

impl ScriptedGateway {
    /// Start a gateway on an ephemeral port
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind gateway listener")?;
        let addr = listener.local_addr()?;

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        let (conn_tx, conn_rx) = mpsc::unbounded_channel();
        let command_rx = Arc::new(Mutex::new(command_rx));

        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let Ok(socket) = tokio_tungstenite::accept_async(stream).await else {
                    continue;
                };
                if conn_tx.send(()).is_err() {
                    break;
                }
                run_session(socket, Arc::clone(&command_rx), frame_tx.clone()).await;
            }
        });

        Ok(Self {
            addr,
            commands: command_tx,
            client_frames: frame_rx,
            connections: conn_rx,
            _handle: handle,
        })
    }

    /// Endpoint URL for the client under test
    pub fn url(&self) -> String {
        format!("ws://{}/connect", self.addr)
    }

    /// Push a text frame to the connected client
    pub fn send_json(&self, json: impl Into<String>) {
        self.commands.send(GatewayCommand::Send(json.into())).ok();
    }

    /// Close the active session with a close handshake
    pub fn close(&self, code: u16) {
        self.commands.send(GatewayCommand::Close(code)).ok();
    }

    /// Drop the active session without a close frame (abnormal closure)
    pub fn drop_connection(&self) {
        self.commands.send(GatewayCommand::Drop).ok();
    }

    /// Wait for the next client connection to be established
    pub async fn wait_for_connection(&mut self) -> Result<()> {
        tokio::time::timeout(WAIT_TIMEOUT, self.connections.recv())
            .await
            .context("timed out waiting for a client connection")?
            .context("gateway accept loop ended")
    }

    /// Assert that no new connection arrives within the window
    pub async fn expect_no_connection(&mut self, window: Duration) -> bool {
        tokio::time::timeout(window, self.connections.recv())
            .await
            .is_err()
    }

    /// Receive the next frame sent by the client
    pub async fn next_client_frame(&mut self) -> Result<serde_json::Value> {
        tokio::time::timeout(WAIT_TIMEOUT, self.client_frames.recv())
            .await
            .context("timed out waiting for a client frame")?
            .context("gateway session channel closed")
    }

    /// Assert that the client sends nothing within the window
    pub async fn expect_no_client_frame(&mut self, window: Duration) -> bool {
        tokio::time::timeout(window, self.client_frames.recv())
            .await
            .is_err()
    }
}

/// Serve one accepted WebSocket session until it ends
async fn run_session(
    socket: tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>,
    commands: Arc<Mutex<mpsc::UnboundedReceiver<GatewayCommand>>>,
    frames: mpsc::UnboundedSender<serde_json::Value>,
) {
    let (mut sink, mut stream) = socket.split();
    let mut commands = commands.lock().await;

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(GatewayCommand::Send(json)) => {
                    if sink.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Some(GatewayCommand::Close(code)) => {
                    let frame = CloseFrame {
                        code: CloseCode::from(code),
                        reason: "scripted close".into(),
                    };
                    let _ = sink.send(Message::Close(Some(frame))).await;
                    // Drain until the client acknowledges or drops
                    while let Some(msg) = stream.next().await {
                        if matches!(msg, Ok(Message::Close(_)) | Err(_)) {
                            break;
                        }
                    }
                    break;
                }
                Some(GatewayCommand::Drop) | None => break,
            },
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    if let Ok(value) = serde_json::from_str(&text) {
                        let _ = frames.send(value);
                    }
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            }
        }
    }
}

/// Poll a condition until it holds or the default timeout elapses
pub async fn wait_until<F>(condition: F) -> bool
where
    F: Fn() -> bool,
{
    let deadline = tokio::time::Instant::now() + WAIT_TIMEOUT;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    condition()
}
