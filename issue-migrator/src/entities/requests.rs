//! Clubhouse creation requests built from GitHub issues.
//!
//! Field names follow the Clubhouse v3 API so the same values serve as the
//! request payload and as the dry-run dump.

use super::ids::{EpicId, ExternalRef, ProjectId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A label to create (or reuse) in Clubhouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelDescriptor {
    /// Label name, unique within a run.
    pub name: String,

    /// Hex color including the leading `#`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Source GitHub label id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl LabelDescriptor {
    /// A label carrying only a name, as used for pipeline labels.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
            description: None,
            external_id: None,
        }
    }
}

/// Clubhouse story type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryKind {
    Bug,
    Feature,
}

/// Request to create one Clubhouse epic from an issue labelled `Epic`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpicCreationRequest {
    pub name: String,
    pub description: String,
    pub external_id: ExternalRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Set from the issue's `closed_at` when it parses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at_override: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_by_id: Option<String>,

    pub owner_ids: Vec<String>,
    pub labels: Vec<LabelDescriptor>,
}

/// Request to create one Clubhouse story from a plain issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryCreationRequest {
    pub name: String,
    pub description: String,
    pub external_id: ExternalRef,
    pub story_type: StoryKind,

    /// Absent only in dry-run plans, where the project is never resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_by_id: Option<String>,

    pub owner_ids: Vec<String>,
    pub comments: Vec<CommentCreationRequest>,

    /// Filled in while epics are reconciled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic_id: Option<EpicId>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment embedded in a [`StoryCreationRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentCreationRequest {
    pub text: String,
    pub author_id: String,

    /// Source GitHub comment id.
    pub external_id: String,

    pub created_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
