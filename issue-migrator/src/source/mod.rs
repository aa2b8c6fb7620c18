//! Source issue tracker (GitHub).

mod error;
mod github;
mod issue;

pub use error::SourceError;
pub use github::GitHubIssues;
pub use issue::{SourceComment, SourceIssue, SourceLabel};

use crate::entities::IssueNumber;
use async_trait::async_trait;

/// Read access to the source issue tracker.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Fetches every issue of a repository, pull requests included, in the
    /// order the tracker reports them.
    async fn fetch_issues(&self, org: &str, repo: &str) -> Result<Vec<SourceIssue>, SourceError>;

    /// Fetches every comment on one issue, oldest first.
    async fn fetch_comments(
        &self,
        org: &str,
        repo: &str,
        number: IssueNumber,
    ) -> Result<Vec<SourceComment>, SourceError>;
}
