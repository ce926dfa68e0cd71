//! Errors surfaced by the client.
//!
//! GraphQL-level errors are not part of this enum: a well-formed response
//! with a populated `errors` array is data, carried on
//! [`Response`](crate::response::Response) for the caller to inspect.

use thiserror::Error;

use crate::options::ConfigError;

/// Errors that can occur while connecting to or querying a Realm app.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid client options, detected before any network call.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP request failed (connection, timeout, protocol).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-200 status.
    #[error("non-200 status code {status}: {body:?}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for logging.
        body: String,
    },

    /// Login or token refresh failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Malformed JSON in a token payload or GraphQL response body.
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// An operation that requires authentication was called before
    /// [`connect`](crate::Client::connect).
    #[error("not connected: call connect() first")]
    NotConnected,
}
