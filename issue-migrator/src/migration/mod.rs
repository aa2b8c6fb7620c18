//! The conversion-and-reconciliation pipeline.
//!
//! [`Converter`] turns GitHub issues into pending Clubhouse entities,
//! [`add_pipeline_labels`] decorates them with ZenHub pipeline labels and
//! [`Persister`] creates them.

mod converter;
mod enricher;
mod error;
mod persister;

pub use converter::{classify, Converter, IssueKind, BUG_LABEL, EPIC_LABEL};
pub use enricher::add_pipeline_labels;
pub use error::MigrationError;
pub use persister::Persister;

use crate::entities::Entities;
use serde::Serialize;

/// Everything a run intends to create, with the parameters it ran under.
///
/// This is the document written in dry-run mode. Dry runs never contact
/// Clubhouse, so the project is recorded by name only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationPlan {
    pub org: String,
    pub repo: String,
    pub repo_id: u64,
    pub project: String,
    pub entities: Entities,
}
