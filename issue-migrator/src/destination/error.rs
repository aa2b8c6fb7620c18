//! Destination error types.

use thiserror::Error;

/// Errors that can occur while talking to Clubhouse.
#[derive(Debug, Error)]
pub enum DestinationError {
    /// Network or decoding error.
    #[error("Clubhouse request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Clubhouse answered with a non-success status.
    #[error("Clubhouse API error {status}: {body}")]
    Status { status: u16, body: String },

    /// Request URL could not be built.
    #[error("Invalid Clubhouse URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
