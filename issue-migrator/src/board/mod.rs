//! Kanban board overlay (ZenHub).

mod epic;
mod error;
mod zenhub;

pub use epic::{BoardEpic, BoardIssue};
pub use error::BoardError;
pub use zenhub::ZenHubBoard;

use crate::entities::IssueNumber;
use async_trait::async_trait;

/// Read access to the board overlay.
#[async_trait]
pub trait BoardOverlay: Send + Sync {
    /// Fetches the epic stored on issue `number` of the board repository
    /// `repo_id`, with its child issues and their pipelines.
    async fn fetch_epic(&self, repo_id: u64, number: IssueNumber) -> Result<BoardEpic, BoardError>;
}
