//! In-memory model of the Clubhouse entities a migration will create.

mod accumulator;
mod ids;
mod labels;
mod requests;

pub use accumulator::Entities;
pub use ids::{EpicId, ExternalRef, IssueNumber, ProjectId, StoryId};
pub use labels::{LabelAggregation, StoryLabel};
pub use requests::{
    CommentCreationRequest, EpicCreationRequest, LabelDescriptor, StoryCreationRequest, StoryKind,
};
