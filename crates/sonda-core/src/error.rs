//! Error taxonomy for the client layer.

use thiserror::Error;

/// Errors produced by the client layer.
///
/// Two families matter to callers: [`Error::Auth`] (login/register rejected,
/// surfaced to the user as a message) and everything else (a resource fetch
/// failed, logged at the poller boundary, after which the view keeps its
/// last-good state). Nothing here is retried; transient failures self-heal
/// on the next poll tick.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error
/// variants in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The base URL was rejected before any request was made.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The backend is not reachable.
    #[error("API not reachable at {url}: {source}")]
    NotReachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP transport or decode failure.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Login or registration rejected by the backend.
    ///
    /// `message` is the server-provided `error` string when present, or a
    /// generic default.
    #[error("{message}")]
    Auth { status: u16, message: String },

    /// A resource call returned a non-2xx response.
    #[error("API error: {message}")]
    Api { status: u16, message: String },

    /// Reading or writing the persisted session failed.
    #[error("Session storage: {0}")]
    Storage(#[from] std::io::Error),

    /// The persisted session file could not be encoded.
    #[error("Session encoding: {0}")]
    SessionFormat(#[from] serde_json::Error),
}

/// Result type alias for client-layer operations.
pub type Result<T> = std::result::Result<T, Error>;
