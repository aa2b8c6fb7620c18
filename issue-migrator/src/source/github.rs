//! GitHub issue source backed by octocrab.

use super::{IssueSource, SourceComment, SourceError, SourceIssue, SourceLabel};
use crate::entities::IssueNumber;
use async_trait::async_trait;
use octocrab::models::issues::{Comment, Issue};
use octocrab::params::State;
use octocrab::Octocrab;
use tracing::{debug, info};

/// Results per page for issue and comment listings.
const RESULTS_PER_PAGE: u8 = 100;

/// Fetches issues and comments through the GitHub REST API.
#[derive(Clone)]
pub struct GitHubIssues {
    octocrab: Octocrab,
}

impl GitHubIssues {
    /// Builds an authenticated client from a personal access token.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::GitHubError`] if the client cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self, SourceError> {
        let octocrab = Octocrab::builder().personal_token(token.into()).build()?;
        Ok(Self { octocrab })
    }

    /// Wraps an existing client.
    pub fn from_octocrab(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }
}

#[async_trait]
impl IssueSource for GitHubIssues {
    async fn fetch_issues(&self, org: &str, repo: &str) -> Result<Vec<SourceIssue>, SourceError> {
        info!(org, repo, "Fetching issues");

        let first_page = self
            .octocrab
            .issues(org, repo)
            .list()
            .state(State::All)
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await?;
        let issues = self.octocrab.all_pages::<Issue>(first_page).await?;

        debug!(count = issues.len(), "Fetched issues");
        Ok(issues.into_iter().map(source_issue).collect())
    }

    async fn fetch_comments(
        &self,
        org: &str,
        repo: &str,
        number: IssueNumber,
    ) -> Result<Vec<SourceComment>, SourceError> {
        debug!(org, repo, issue_number = %number, "Fetching comments");

        let first_page = self
            .octocrab
            .issues(org, repo)
            .list_comments(number.0)
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await?;
        let comments = self.octocrab.all_pages::<Comment>(first_page).await?;

        Ok(comments.into_iter().map(source_comment).collect())
    }
}

fn source_issue(issue: Issue) -> SourceIssue {
    SourceIssue {
        id: issue.id.into_inner(),
        number: IssueNumber(issue.number),
        title: issue.title,
        body: issue.body.unwrap_or_default(),
        created_at: issue.created_at,
        updated_at: issue.updated_at,
        closed_at: issue.closed_at.map(|closed| closed.to_rfc3339()),
        author: Some(issue.user.login),
        assignees: issue
            .assignees
            .into_iter()
            .map(|assignee| assignee.login)
            .collect(),
        labels: issue
            .labels
            .into_iter()
            .map(|label| SourceLabel {
                id: label.id.into_inner(),
                name: label.name,
                color: label.color,
                description: label.description.unwrap_or_default(),
            })
            .collect(),
        is_pull_request: issue.pull_request.is_some(),
    }
}

fn source_comment(comment: Comment) -> SourceComment {
    SourceComment {
        id: comment.id.into_inner(),
        body: comment.body.unwrap_or_default(),
        author: comment.user.login,
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    }
}
