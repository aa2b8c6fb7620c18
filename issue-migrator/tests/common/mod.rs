//! In-memory collaborators shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use issue_migrator::{
    BoardEpic, BoardError, BoardIssue, BoardOverlay, CreatedEpic, CreatedStory, Destination,
    DestinationError, EpicCreationRequest, EpicId, IssueNumber, IssueSource, LabelDescriptor,
    LoginMapping, Project, ProjectId, SourceComment, SourceError, SourceIssue, SourceLabel,
    StoryCreationRequest, StoryId,
};
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

pub const PROJECT_NAME: &str = "Widgets";
pub const PROJECT_ID: ProjectId = ProjectId(7);

pub fn issue(number: u64, title: &str) -> SourceIssue {
    let at = Utc.with_ymd_and_hms(2020, 4, 1, 9, 0, 0).unwrap();
    SourceIssue {
        id: 90_000 + number,
        number: IssueNumber(number),
        title: title.to_string(),
        body: format!("  Body of {title}\n"),
        created_at: at,
        updated_at: at,
        closed_at: None,
        author: None,
        assignees: Vec::new(),
        labels: Vec::new(),
        is_pull_request: false,
    }
}

pub fn label(id: u64, name: &str) -> SourceLabel {
    SourceLabel {
        id,
        name: name.to_string(),
        color: "cccccc".to_string(),
        description: format!("{name} label"),
    }
}

pub fn comment(id: u64, author: &str, body: &str) -> SourceComment {
    SourceComment {
        id,
        body: body.to_string(),
        author: author.to_string(),
        created_at: Utc.with_ymd_and_hms(2020, 4, 2, 9, 0, 0).unwrap(),
        updated_at: None,
    }
}

/// Maps `alice` to `A1`, `bob` to `B1`, `carol` to `C1`; `ghost` is unknown
/// with no fallback; everyone else falls back to `BOT`.
pub fn mapper(login: &str) -> LoginMapping {
    match login {
        "alice" => LoginMapping::Exact("A1".to_string()),
        "bob" => LoginMapping::Exact("B1".to_string()),
        "carol" => LoginMapping::Exact("C1".to_string()),
        "ghost" => LoginMapping::NotFound,
        _ => LoginMapping::Fallback("BOT".to_string()),
    }
}

/// Collects formatted log output on the current thread.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Routes this thread's events here until the guard drops.
    pub fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[derive(Default)]
pub struct ScriptedSource {
    pub issues: Vec<SourceIssue>,
    pub comments: HashMap<u64, Vec<SourceComment>>,
    pub fail_issues: bool,
    pub fail_comments_for: HashSet<u64>,
}

impl ScriptedSource {
    pub fn new(issues: Vec<SourceIssue>) -> Self {
        Self {
            issues,
            ..Default::default()
        }
    }

    pub fn with_comments(mut self, number: u64, comments: Vec<SourceComment>) -> Self {
        self.comments.insert(number, comments);
        self
    }
}

#[async_trait]
impl IssueSource for ScriptedSource {
    async fn fetch_issues(&self, _org: &str, _repo: &str) -> Result<Vec<SourceIssue>, SourceError> {
        if self.fail_issues {
            return Err(SourceError::Unavailable("issues offline".to_string()));
        }
        Ok(self.issues.clone())
    }

    async fn fetch_comments(
        &self,
        _org: &str,
        _repo: &str,
        number: IssueNumber,
    ) -> Result<Vec<SourceComment>, SourceError> {
        if self.fail_comments_for.contains(&number.0) {
            return Err(SourceError::Unavailable("comments offline".to_string()));
        }
        Ok(self.comments.get(&number.0).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct ScriptedBoard {
    pub epics: HashMap<u64, BoardEpic>,
    pub failing: HashSet<u64>,
    pub fetches: Mutex<Vec<u64>>,
}

impl ScriptedBoard {
    /// Adds an epic whose children are `(issue number, is epic, pipeline)`.
    pub fn with_epic(mut self, number: u64, children: &[(u64, bool, &str)]) -> Self {
        let issues = children
            .iter()
            .map(|(child, is_epic, pipeline)| BoardIssue {
                issue_number: IssueNumber(*child),
                is_epic: *is_epic,
                pipeline_name: pipeline.to_string(),
            })
            .collect();
        self.epics.insert(number, BoardEpic { issues });
        self
    }

    pub fn failing_on(mut self, number: u64) -> Self {
        self.failing.insert(number);
        self
    }
}

#[async_trait]
impl BoardOverlay for ScriptedBoard {
    async fn fetch_epic(
        &self,
        _repo_id: u64,
        number: IssueNumber,
    ) -> Result<BoardEpic, BoardError> {
        self.fetches.lock().unwrap().push(number.0);
        if self.failing.contains(&number.0) {
            return Err(BoardError::Status {
                status: 500,
                body: "board offline".to_string(),
            });
        }
        Ok(self.epics.get(&number.0).cloned().unwrap_or_default())
    }
}

/// One call made against the destination.
#[derive(Debug, Clone)]
pub enum Call {
    ListProjects,
    CreateEpic(EpicCreationRequest),
    BulkCreateStories(Vec<StoryCreationRequest>),
    ApplyLabel(LabelDescriptor, Vec<StoryId>),
}

/// Records every call; epics get ids from 500 up, stories from 1000 up.
#[derive(Default)]
pub struct RecordingDestination {
    pub calls: Mutex<Vec<Call>>,
    pub fail_epics: HashSet<String>,
    pub fail_stories: bool,
    pub fail_labels: HashSet<String>,
    pub drop_external_ids: bool,
    pub projects: Vec<Project>,
}

impl RecordingDestination {
    pub fn new() -> Self {
        Self {
            projects: vec![
                Project {
                    id: ProjectId(1),
                    name: "Other".to_string(),
                },
                Project {
                    id: PROJECT_ID,
                    name: PROJECT_NAME.to_string(),
                },
            ],
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created_stories(&self) -> Vec<StoryCreationRequest> {
        self.calls()
            .into_iter()
            .find_map(|call| match call {
                Call::BulkCreateStories(stories) => Some(stories),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn applied_labels(&self) -> Vec<(String, Vec<StoryId>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::ApplyLabel(label, ids) => Some((label.name, ids)),
                _ => None,
            })
            .collect()
    }

    fn failure() -> DestinationError {
        DestinationError::Status {
            status: 422,
            body: "rejected".to_string(),
        }
    }
}

#[async_trait]
impl Destination for RecordingDestination {
    async fn list_projects(&self) -> Result<Vec<Project>, DestinationError> {
        self.calls.lock().unwrap().push(Call::ListProjects);
        Ok(self.projects.clone())
    }

    async fn create_epic(
        &self,
        request: &EpicCreationRequest,
    ) -> Result<CreatedEpic, DestinationError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(Call::CreateEpic(request.clone()));
        if self.fail_epics.contains(&request.name) {
            return Err(Self::failure());
        }
        let created = calls
            .iter()
            .filter(|call| matches!(call, Call::CreateEpic(_)))
            .count();
        Ok(CreatedEpic {
            id: EpicId(500 + created as i64),
            name: request.name.clone(),
        })
    }

    async fn bulk_create_stories(
        &self,
        stories: &[StoryCreationRequest],
    ) -> Result<Vec<CreatedStory>, DestinationError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::BulkCreateStories(stories.to_vec()));
        if self.fail_stories {
            return Err(Self::failure());
        }
        Ok(stories
            .iter()
            .enumerate()
            .map(|(i, story)| CreatedStory {
                id: StoryId(1000 + i as i64),
                name: story.name.clone(),
                external_id: (!self.drop_external_ids).then(|| story.external_id.clone()),
            })
            .collect())
    }

    async fn apply_label_to_stories(
        &self,
        label: &LabelDescriptor,
        story_ids: &[StoryId],
    ) -> Result<(), DestinationError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::ApplyLabel(label.clone(), story_ids.to_vec()));
        if self.fail_labels.contains(&label.name) {
            return Err(Self::failure());
        }
        Ok(())
    }
}
