//! Client error types

use thiserror::Error;

/// Errors surfaced by the client to its caller
///
/// Transport and decode failures are handled inside the connection layer and
/// never appear here; the consumer only sees local send-side conditions.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A send was attempted while the connection is not open.
    /// The frame is dropped, not queued.
    #[error("connection is not open")]
    NotConnected,

    /// An outbound frame could not be encoded
    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),

    /// The outbound queue rejected the frame (closed or full)
    #[error("outbound queue rejected the frame")]
    SendFailed,
}

/// Client result type
pub type ClientResult<T> = Result<T, ClientError>;
