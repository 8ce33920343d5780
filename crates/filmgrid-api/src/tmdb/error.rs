//! Error type returned by the movie search client.

use thiserror::Error;

/// Any failure while fetching a result page.
///
/// The variants only exist for diagnostics; the search controller
/// treats every one of them the same way.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The request could not be sent or its body could not be read
    /// (DNS, connect, timeout, TLS).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("TMDB API error (HTTP {status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// TMDB `status_message`, or the raw body when it is not a TMDB error envelope.
        message: String,
    },

    /// The body was not a valid result page.
    #[error("failed to decode JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl NetworkError {
    /// Returns the HTTP status code when the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}
