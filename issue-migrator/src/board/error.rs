//! Board overlay error types.

use thiserror::Error;

/// Errors that can occur while reading the ZenHub board.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Network or decoding error.
    #[error("ZenHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// ZenHub answered with a non-success status.
    #[error("ZenHub API error {status}: {body}")]
    Status { status: u16, body: String },

    /// Request URL could not be built.
    #[error("Invalid ZenHub URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
