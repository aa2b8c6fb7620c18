//! Creation of the pending entities in Clubhouse.
//!
//! Runs three phases strictly in order:
//! 1. epics are created and their ZenHub children linked to story requests,
//! 2. all stories are created in one bulk call,
//! 3. each aggregated label is applied to the created stories.
//!
//! Epic and label failures are logged and skipped. A failed bulk story call
//! aborts the run; anything created before it stays created.

use super::MigrationError;
use crate::board::{BoardEpic, BoardOverlay};
use crate::destination::{CreatedStory, Destination};
use crate::entities::{Entities, EpicId, IssueNumber, LabelAggregation, StoryId};
use crate::summary::RunSummary;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Writes a converted migration to Clubhouse.
pub struct Persister<'a> {
    destination: &'a dyn Destination,
    board: &'a dyn BoardOverlay,
    repo_id: u64,
}

impl<'a> Persister<'a> {
    pub fn new(
        destination: &'a dyn Destination,
        board: &'a dyn BoardOverlay,
        repo_id: u64,
    ) -> Self {
        Self {
            destination,
            board,
            repo_id,
        }
    }

    /// Creates epics, stories and labels.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::StoryCreation`] when the bulk story call fails.
    pub async fn persist(
        &self,
        mut entities: Entities,
        summary: &mut RunSummary,
    ) -> Result<Vec<CreatedStory>, MigrationError> {
        self.create_epics(&mut entities, summary)
            .instrument(info_span!("epics"))
            .await;

        let stories = self
            .create_stories(&entities, summary)
            .instrument(info_span!("stories"))
            .await?;

        self.apply_labels(&entities.labels, &stories, summary)
            .instrument(info_span!("labels"))
            .await;

        Ok(stories)
    }

    async fn create_epics(&self, entities: &mut Entities, summary: &mut RunSummary) {
        for index in 0..entities.epics.len() {
            let request = &entities.epics[index];
            let created = match self.destination.create_epic(request).await {
                Ok(created) => created,
                Err(e) => {
                    error!(epic = %request.name, error = %e, "Failed to create epic");
                    summary.epics_failed += 1;
                    continue;
                }
            };
            summary.epics_created += 1;
            debug!(epic = %request.name, id = %created.id, "Created epic");

            let Some(number) = request.external_id.issue_number() else {
                warn!(
                    external_id = %request.external_id,
                    "Epic external id is not an issue number"
                );
                summary.board_epics_failed += 1;
                continue;
            };

            match self.board.fetch_epic(self.repo_id, number).await {
                Ok(board_epic) => link_stories(entities, created.id, &board_epic, summary),
                Err(e) => {
                    warn!(
                        epic = %number,
                        error = %e,
                        "Failed to fetch ZenHub epic, stories stay unlinked"
                    );
                    summary.board_epics_failed += 1;
                }
            }
        }

        info!(
            created = summary.epics_created,
            failed = summary.epics_failed,
            "Processed epics"
        );
    }

    async fn create_stories(
        &self,
        entities: &Entities,
        summary: &mut RunSummary,
    ) -> Result<Vec<CreatedStory>, MigrationError> {
        if entities.stories.is_empty() {
            info!("No stories to create");
            return Ok(Vec::new());
        }

        let stories = self
            .destination
            .bulk_create_stories(&entities.stories)
            .await
            .map_err(MigrationError::StoryCreation)?;

        summary.stories_created += stories.len();
        info!(count = stories.len(), "Processed stories");
        Ok(stories)
    }

    async fn apply_labels(
        &self,
        labels: &LabelAggregation,
        stories: &[CreatedStory],
        summary: &mut RunSummary,
    ) {
        let index = index_by_external_id(stories);

        for story_label in labels.iter() {
            let label = &story_label.label;
            let story_ids = story_ids_for(&index, &story_label.issue_numbers);
            if story_ids.is_empty() {
                debug!(label = %label.name, "No created stories carry label");
                summary.labels_skipped += 1;
                continue;
            }

            match self
                .destination
                .apply_label_to_stories(label, &story_ids)
                .await
            {
                Ok(()) => summary.labels_applied += 1,
                Err(e) => {
                    error!(
                        label = %label.name,
                        stories = ?story_ids,
                        error = %e,
                        "Failed to apply label"
                    );
                    summary.labels_failed += 1;
                }
            }
        }

        info!(
            applied = summary.labels_applied,
            failed = summary.labels_failed,
            skipped = summary.labels_skipped,
            "Processed labels"
        );
    }
}

/// Points every story under `board_epic` at the created epic.
///
/// A story listed under several epics ends up linked to the last one.
fn link_stories(
    entities: &mut Entities,
    epic_id: EpicId,
    board_epic: &BoardEpic,
    summary: &mut RunSummary,
) {
    for child in board_epic.issues.iter().filter(|child| !child.is_epic) {
        for story in entities.stories_for_mut(child.issue_number) {
            if let Some(previous) = story.epic_id.filter(|previous| *previous != epic_id) {
                warn!(
                    issue_number = %child.issue_number,
                    previous_epic = %previous,
                    epic = %epic_id,
                    "Story listed under several epics, relinking"
                );
            }
            story.epic_id = Some(epic_id);
            summary.epic_links_set += 1;
        }
    }
}

fn index_by_external_id(stories: &[CreatedStory]) -> HashMap<&str, Vec<StoryId>> {
    let mut index: HashMap<&str, Vec<StoryId>> = HashMap::new();
    for story in stories {
        if let Some(external_id) = &story.external_id {
            index
                .entry(external_id.as_str())
                .or_default()
                .push(story.id);
        }
    }
    index
}

/// Resolves issue numbers to created story ids; unknown numbers are dropped.
fn story_ids_for(
    index: &HashMap<&str, Vec<StoryId>>,
    numbers: &BTreeSet<IssueNumber>,
) -> Vec<StoryId> {
    numbers
        .iter()
        .filter_map(|number| index.get(number.to_string().as_str()))
        .flatten()
        .copied()
        .collect()
}
