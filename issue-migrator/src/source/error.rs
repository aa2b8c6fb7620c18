//! Issue source error types.

use thiserror::Error;

/// Errors that can occur while fetching issues or comments.
#[derive(Debug, Error)]
pub enum SourceError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The source could not serve the request.
    #[error("Issue source unavailable: {0}")]
    Unavailable(String),
}
