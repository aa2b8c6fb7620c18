//! GitHub issue data as seen by the converter.

use crate::entities::IssueNumber;
use chrono::{DateTime, Utc};

/// A label attached to a source issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLabel {
    /// GitHub label id.
    pub id: u64,
    pub name: String,
    /// Hex color without the leading `#`, as GitHub reports it.
    pub color: String,
    pub description: String,
}

/// A GitHub issue or pull request, immutable once fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceIssue {
    /// GitHub global issue id.
    pub id: u64,
    pub number: IssueNumber,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Raw RFC 3339 text; parsed during conversion.
    pub closed_at: Option<String>,

    /// Author login, absent for deleted accounts.
    pub author: Option<String>,
    pub assignees: Vec<String>,
    pub labels: Vec<SourceLabel>,

    /// Set when GitHub reports the issue as a pull request.
    pub is_pull_request: bool,
}

impl SourceIssue {
    /// Whether the issue carries a label with exactly this name.
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.name == name)
    }
}

/// A comment on a source issue.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceComment {
    /// GitHub comment id.
    pub id: u64,
    pub body: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
