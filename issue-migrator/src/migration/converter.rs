//! Conversion of GitHub issues into Clubhouse creation requests.

use super::MigrationError;
use crate::entities::{
    CommentCreationRequest, Entities, EpicCreationRequest, ExternalRef, LabelDescriptor,
    ProjectId, StoryCreationRequest, StoryKind,
};
use crate::identity::{IdentityMapper, LoginMapping, MissingLogins};
use crate::source::{IssueSource, SourceIssue, SourceLabel};
use crate::summary::RunSummary;
use chrono::{DateTime, Utc};
use tracing::{debug, info, info_span, warn, Instrument};

/// Label marking an issue as an epic.
pub const EPIC_LABEL: &str = "Epic";

/// Label turning a story into a bug.
pub const BUG_LABEL: &str = "Bug";

/// How a source issue is migrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    PullRequest,
    Epic,
    Story,
}

/// Classifies an issue. Pull requests win over the `Epic` label.
pub fn classify(issue: &SourceIssue) -> IssueKind {
    if issue.is_pull_request {
        IssueKind::PullRequest
    } else if issue.has_label(EPIC_LABEL) {
        IssueKind::Epic
    } else {
        IssueKind::Story
    }
}

/// Walks the issues of one repository and builds the pending entities.
pub struct Converter<'a> {
    source: &'a dyn IssueSource,
    mapper: &'a dyn IdentityMapper,
    org: &'a str,
    repo: &'a str,
    project_id: Option<ProjectId>,
}

impl<'a> Converter<'a> {
    pub fn new(
        source: &'a dyn IssueSource,
        mapper: &'a dyn IdentityMapper,
        org: &'a str,
        repo: &'a str,
        project_id: Option<ProjectId>,
    ) -> Self {
        Self {
            source,
            mapper,
            org,
            repo,
            project_id,
        }
    }

    /// Fetches every issue and converts it, in fetch order.
    ///
    /// # Errors
    ///
    /// Fails when issues or comments cannot be fetched, or when a comment
    /// author cannot be mapped to any Clubhouse member.
    pub async fn convert(
        &self,
        missing: &mut MissingLogins,
        summary: &mut RunSummary,
    ) -> Result<Entities, MigrationError> {
        let span = info_span!("convert", org = self.org, repo = self.repo);

        async {
            let issues = self
                .source
                .fetch_issues(self.org, self.repo)
                .await
                .map_err(|source| MigrationError::IssueFetch {
                    org: self.org.to_string(),
                    repo: self.repo.to_string(),
                    source,
                })?;

            info!(count = issues.len(), "Converting issues");
            summary.issues_fetched += issues.len();

            let mut entities = Entities::new();
            for issue in &issues {
                self.convert_issue(issue, &mut entities, missing, summary)
                    .await?;
            }

            info!(
                epics = entities.epics.len(),
                stories = entities.stories.len(),
                labels = entities.labels.len(),
                "Conversion complete"
            );
            Ok(entities)
        }
        .instrument(span)
        .await
    }

    async fn convert_issue(
        &self,
        issue: &SourceIssue,
        entities: &mut Entities,
        missing: &mut MissingLogins,
        summary: &mut RunSummary,
    ) -> Result<(), MigrationError> {
        match classify(issue) {
            IssueKind::PullRequest => {
                debug!(issue_number = %issue.number, "Skipping pull request");
                summary.pull_requests_skipped += 1;
            }
            IssueKind::Epic => {
                entities.epics.push(self.epic_from_issue(issue, missing));
                summary.epics_converted += 1;
            }
            IssueKind::Story => {
                let story = self.story_from_issue(issue, missing).await?;
                entities.stories.push(story);
                for label in &issue.labels {
                    entities.labels.add(label_descriptor(label), issue.number);
                }
                summary.stories_converted += 1;
            }
        }
        Ok(())
    }

    fn epic_from_issue(
        &self,
        issue: &SourceIssue,
        missing: &mut MissingLogins,
    ) -> EpicCreationRequest {
        let mut request = EpicCreationRequest {
            name: issue.title.clone(),
            description: issue.body.clone(),
            external_id: ExternalRef::from(issue.number),
            created_at: issue.created_at,
            updated_at: issue.updated_at,
            completed_at_override: None,
            requested_by_id: None,
            owner_ids: Vec::new(),
            labels: issue.labels.iter().map(label_descriptor).collect(),
        };

        if let Some(author) = &issue.author {
            match self.map_login(author, missing).member_id() {
                Some(id) => request.requested_by_id = Some(id.to_string()),
                None => warn!(
                    login = %author,
                    epic = %request.name,
                    "Failed to set requester on epic"
                ),
            }
        }

        if let Some(closed_at) = &issue.closed_at {
            match parse_timestamp(closed_at) {
                Some(closed) => request.completed_at_override = Some(closed),
                None => warn!(
                    closed_at = %closed_at,
                    epic = %request.name,
                    "Failed to set completion time on epic"
                ),
            }
        }

        for assignee in &issue.assignees {
            match self.map_login(assignee, missing).member_id() {
                Some(id) => request.owner_ids.push(id.to_string()),
                None => warn!(
                    login = %assignee,
                    epic = %request.name,
                    "Failed to add owner to epic"
                ),
            }
        }

        request
    }

    async fn story_from_issue(
        &self,
        issue: &SourceIssue,
        missing: &mut MissingLogins,
    ) -> Result<StoryCreationRequest, MigrationError> {
        let story_type = if issue.has_label(BUG_LABEL) {
            StoryKind::Bug
        } else {
            StoryKind::Feature
        };

        let requested_by_id = issue.author.as_ref().and_then(|author| {
            self.map_login(author, missing)
                .member_id()
                .filter(|id| !id.is_empty())
                .map(str::to_string)
        });

        // Fallback members never own stories.
        let owner_ids = issue
            .assignees
            .iter()
            .filter_map(|assignee| {
                self.map_login(assignee, missing)
                    .exact_id()
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
            })
            .collect();

        let comments = self.comments_for(issue, missing).await?;

        Ok(StoryCreationRequest {
            name: issue.title.clone(),
            description: issue.body.trim().to_string(),
            external_id: ExternalRef::from(issue.number),
            story_type,
            project_id: self.project_id,
            requested_by_id,
            owner_ids,
            comments,
            epic_id: None,
            created_at: issue.created_at,
            updated_at: issue.updated_at,
        })
    }

    async fn comments_for(
        &self,
        issue: &SourceIssue,
        missing: &mut MissingLogins,
    ) -> Result<Vec<CommentCreationRequest>, MigrationError> {
        let comments = self
            .source
            .fetch_comments(self.org, self.repo, issue.number)
            .await
            .map_err(|source| MigrationError::CommentFetch {
                issue_number: issue.number,
                source,
            })?;

        comments
            .into_iter()
            .map(|comment| -> Result<CommentCreationRequest, MigrationError> {
                let author_id = self
                    .map_login(&comment.author, missing)
                    .member_id()
                    .map(str::to_string)
                    .ok_or_else(|| MigrationError::UnmappedCommentAuthor {
                        login: comment.author.clone(),
                        issue_number: issue.number,
                        comment_id: comment.id,
                    })?;

                Ok(CommentCreationRequest {
                    text: comment.body.trim().to_string(),
                    author_id,
                    external_id: comment.id.to_string(),
                    created_at: comment.created_at,
                    updated_at: comment.updated_at,
                })
            })
            .collect()
    }

    /// Maps a login, recording it when the match is not exact.
    fn map_login(&self, login: &str, missing: &mut MissingLogins) -> LoginMapping {
        let mapping = self.mapper.map(login);
        if !mapping.is_exact() {
            missing.record(login);
        }
        mapping
    }
}

fn label_descriptor(label: &SourceLabel) -> LabelDescriptor {
    LabelDescriptor {
        name: label.name.clone(),
        color: Some(format!("#{}", label.color)),
        description: Some(label.description.clone()),
        external_id: Some(label.id.to_string()),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}
