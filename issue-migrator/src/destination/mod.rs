//! Destination project-management tool (Clubhouse).

mod clubhouse;
mod error;
mod records;

pub use clubhouse::ClubhouseDestination;
pub use error::DestinationError;
pub use records::{CreatedEpic, CreatedStory, Project};

use crate::entities::{EpicCreationRequest, LabelDescriptor, StoryCreationRequest, StoryId};
use async_trait::async_trait;

/// Write access to the destination.
#[async_trait]
pub trait Destination: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>, DestinationError>;

    async fn create_epic(
        &self,
        request: &EpicCreationRequest,
    ) -> Result<CreatedEpic, DestinationError>;

    /// Creates all stories in one call; either every story is created or the
    /// call fails.
    async fn bulk_create_stories(
        &self,
        stories: &[StoryCreationRequest],
    ) -> Result<Vec<CreatedStory>, DestinationError>;

    /// Adds `label` to every story in `story_ids`, creating the label on first
    /// use.
    async fn apply_label_to_stories(
        &self,
        label: &LabelDescriptor,
        story_ids: &[StoryId],
    ) -> Result<(), DestinationError>;
}
