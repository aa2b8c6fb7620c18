//! ZenHub epic data.

use crate::entities::IssueNumber;
use serde::Deserialize;

/// A ZenHub epic and the issues grouped under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardEpic {
    pub issues: Vec<BoardIssue>,
}

/// One child issue of a ZenHub epic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardIssue {
    pub issue_number: IssueNumber,
    pub is_epic: bool,

    /// Pipeline (board column) the issue sits in; empty when unknown.
    pub pipeline_name: String,
}

/// Wire format of `GET /p1/repositories/{repo_id}/epics/{issue_number}`.
#[derive(Debug, Deserialize)]
pub(crate) struct EpicResponse {
    #[serde(default)]
    issues: Vec<EpicIssueResponse>,
}

#[derive(Debug, Deserialize)]
struct EpicIssueResponse {
    issue_number: u64,
    #[serde(default)]
    is_epic: bool,
    pipeline: Option<PipelineResponse>,
}

#[derive(Debug, Deserialize)]
struct PipelineResponse {
    #[serde(default)]
    name: String,
}

impl EpicResponse {
    pub(crate) fn into_epic(self) -> BoardEpic {
        let issues = self
            .issues
            .into_iter()
            .map(|issue| BoardIssue {
                issue_number: IssueNumber(issue.issue_number),
                is_epic: issue.is_epic,
                pipeline_name: issue.pipeline.map(|p| p.name).unwrap_or_default(),
            })
            .collect();
        BoardEpic { issues }
    }
}
