//! Pipeline labels from the ZenHub board.

use crate::board::BoardOverlay;
use crate::entities::Entities;
use crate::summary::RunSummary;
use tracing::{debug, info, info_span, warn, Instrument};

/// Labels every story under a converted epic with the ZenHub pipeline its
/// issue sits in.
///
/// Nested epics are ignored. Board read failures and children without a
/// matching story are logged and skipped; nothing here aborts the run.
pub async fn add_pipeline_labels(
    board: &dyn BoardOverlay,
    repo_id: u64,
    entities: &mut Entities,
    summary: &mut RunSummary,
) {
    let span = info_span!("pipelines", repo_id);

    async {
        let epic_refs: Vec<_> = entities
            .epics
            .iter()
            .map(|epic| epic.external_id.clone())
            .collect();

        for external_id in epic_refs {
            let Some(number) = external_id.issue_number() else {
                warn!(
                    external_id = %external_id,
                    "Epic external id is not an issue number"
                );
                summary.board_epics_failed += 1;
                continue;
            };

            let epic = match board.fetch_epic(repo_id, number).await {
                Ok(epic) => epic,
                Err(e) => {
                    warn!(epic = %number, error = %e, "Failed to fetch ZenHub epic");
                    summary.board_epics_failed += 1;
                    continue;
                }
            };

            for child in &epic.issues {
                if child.pipeline_name.is_empty() {
                    continue;
                }
                if child.is_epic {
                    debug!(issue_number = %child.issue_number, "Skipping nested epic");
                    continue;
                }
                if !entities.has_story(child.issue_number) {
                    warn!(
                        epic = %number,
                        issue_number = %child.issue_number,
                        pipeline = %child.pipeline_name,
                        "No story for pipeline label"
                    );
                    summary.pipeline_labels_unmatched += 1;
                    continue;
                }

                debug!(
                    issue_number = %child.issue_number,
                    pipeline = %child.pipeline_name,
                    "Attaching pipeline label"
                );
                entities
                    .labels
                    .attach(&child.pipeline_name, child.issue_number);
                summary.pipeline_labels_attached += 1;
            }
        }

        info!(
            attached = summary.pipeline_labels_attached,
            "Pipeline labels attached"
        );
    }
    .instrument(span)
    .await
}
