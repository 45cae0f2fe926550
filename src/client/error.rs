//! Error taxonomy for the HTTP client pipeline.
//!
//! Every failed call maps onto exactly one of these variants; the response
//! interceptor keys its global side effects (session teardown, user
//! notices) off the variant and then propagates the error unchanged.

use thiserror::Error;

/// Structured error body the API attaches to non-2xx responses.
#[derive(Debug, serde::Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Server rejected the credential. Triggers session teardown.
    #[error("unauthorized: {}", message.as_deref().unwrap_or("session rejected by server"))]
    Unauthorized { message: Option<String> },

    /// 5xx-class fault on the server side.
    #[error("server error (status {status})")]
    Server { status: u16 },

    /// 4xx-class fault, carrying the server's message when it sent one.
    #[error("request rejected (status {status}): {}", message.as_deref().unwrap_or("no detail"))]
    Client { status: u16, message: Option<String> },

    /// The request went out but no response came back.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The request could not be constructed or sent at all.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a body the typed layer could not decode.
    #[error("malformed response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The envelope was accepted but carried no `result` payload.
    #[error("response envelope had no result")]
    EmptyResult,
}

impl ApiError {
    /// Status code of the underlying HTTP response, where one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Server { status } | ApiError::Client { status, .. } => Some(*status),
            _ => None,
        }
    }
}
