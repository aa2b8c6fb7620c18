//! Run-level migration errors.
//!
//! Only failures that abort a run are represented here; per-item failures are
//! logged and counted in the [`RunSummary`](crate::summary::RunSummary).

use crate::destination::DestinationError;
use crate::dump::DumpError;
use crate::entities::IssueNumber;
use crate::source::SourceError;
use thiserror::Error;

/// Errors that abort a migration run.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Clubhouse projects could not be listed.
    #[error("Failed to list Clubhouse projects: {0}")]
    ProjectListing(#[source] DestinationError),

    /// No Clubhouse project has the requested name.
    #[error("No Clubhouse project named '{name}'")]
    ProjectNotFound { name: String },

    /// The issue list could not be fetched.
    #[error("Failed to fetch issues for {org}/{repo}: {source}")]
    IssueFetch {
        org: String,
        repo: String,
        #[source]
        source: SourceError,
    },

    /// Comments for an issue could not be fetched.
    #[error("Failed to fetch comments for issue #{issue_number}: {source}")]
    CommentFetch {
        issue_number: IssueNumber,
        #[source]
        source: SourceError,
    },

    /// A comment author has no Clubhouse member and no fallback applies.
    #[error(
        "No Clubhouse member for GitHub login '{login}' \
         (comment {comment_id} on issue #{issue_number})"
    )]
    UnmappedCommentAuthor {
        login: String,
        issue_number: IssueNumber,
        comment_id: u64,
    },

    /// The bulk story creation call failed.
    #[error("Failed to create stories: {0}")]
    StoryCreation(#[source] DestinationError),

    /// The dry-run dump could not be written.
    #[error(transparent)]
    Dump(#[from] DumpError),
}
