//! Error types for the API client.
//!
//! # Design
//! The client does no error translation. Transport failures are wrapped
//! transparently so the original `TransportError` is what the caller
//! matches on. Every non-2xx response lands in `Status` with the raw code and
//! body; 404 gets no special variant.

use thiserror::Error;

/// Failures raised by a `Transport` before a response was received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The transport gave up waiting for the server.
    #[error("request timed out")]
    Timeout,

    /// Connection refused, DNS failure, or I/O error on the socket. `source`
    /// holds the backend's own error when it has one.
    #[error("connection failed: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The caller's `AbortSignal` fired before the response arrived.
    #[error("request aborted")]
    Aborted,

    #[error("transport error: {0}")]
    Other(#[source] BoxError),
}

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

impl TransportError {
    /// A connection failure with no underlying error value to keep.
    pub fn connection(message: impl Into<String>) -> Self {
        TransportError::Connection {
            message: message.into(),
            source: None,
        }
    }
}

/// Errors returned by `ApiClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport failed; the inner value is passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a status outside 2xx.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body is not valid JSON for the requested type.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    /// Status code of a non-2xx response, if that is what this error is.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
