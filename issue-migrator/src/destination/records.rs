//! Records returned by Clubhouse.

use crate::entities::{EpicId, ExternalRef, ProjectId, StoryId};
use serde::{Deserialize, Serialize};

/// A Clubhouse project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
}

/// An epic as created in Clubhouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedEpic {
    pub id: EpicId,
    pub name: String,
}

/// A story as created in Clubhouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedStory {
    pub id: StoryId,
    pub name: String,

    /// Echo of the request's external id.
    #[serde(default)]
    pub external_id: Option<ExternalRef>,
}
