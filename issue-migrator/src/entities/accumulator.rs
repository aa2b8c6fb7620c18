//! Pending Clubhouse entities for a single migration run.

use super::ids::IssueNumber;
use super::labels::LabelAggregation;
use super::requests::{EpicCreationRequest, StoryCreationRequest};
use serde::Serialize;

/// Everything a run intends to create, in conversion order.
///
/// Owned by exactly one run and dropped once persisted or dumped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Entities {
    pub epics: Vec<EpicCreationRequest>,
    pub stories: Vec<StoryCreationRequest>,
    pub labels: LabelAggregation,
}

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a story was converted from the given issue.
    pub fn has_story(&self, number: IssueNumber) -> bool {
        self.stories
            .iter()
            .any(|story| story.external_id.refers_to(number))
    }

    /// Stories converted from the given issue.
    ///
    /// External ids are unique per run, so this yields at most one story for
    /// well-formed input.
    pub fn stories_for_mut(
        &mut self,
        number: IssueNumber,
    ) -> impl Iterator<Item = &mut StoryCreationRequest> {
        self.stories
            .iter_mut()
            .filter(move |story| story.external_id.refers_to(number))
    }
}
