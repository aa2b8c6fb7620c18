mod common;

use common::{
    comment, issue, label, mapper, Call, RecordingDestination, ScriptedBoard, ScriptedSource,
    PROJECT_ID,
};
use issue_migrator::{
    EpicId, IdentityMapper, MigrationError, RunSummary, Runner, RunnerConfig, RunnerError, StoryId,
};
use std::sync::Arc;

fn config(dry_run: bool) -> RunnerConfig {
    RunnerConfig::new("acme", "widgets", 4242, common::PROJECT_NAME, dry_run)
}

async fn run(
    config: RunnerConfig,
    source: ScriptedSource,
    board: ScriptedBoard,
    destination: Arc<RecordingDestination>,
) -> Result<RunSummary, RunnerError> {
    let mapper: Arc<dyn IdentityMapper> = Arc::new(mapper);
    Runner::new(
        config,
        Arc::new(source),
        Arc::new(board),
        destination,
        mapper,
    )
    .run()
    .await
}

/// Epic #5 groups #10 and #11; #12 stands alone; #13 is a pull request.
fn sample_source() -> ScriptedSource {
    let mut epic = issue(5, "Checkout");
    epic.labels = vec![label(1, "Epic")];
    let mut bug = issue(10, "Cart empties");
    bug.labels = vec![label(2, "Bug")];
    bug.author = Some("alice".to_string());
    let mut feature = issue(11, "Coupons");
    feature.labels = vec![label(3, "Frontend")];
    let mut loose = issue(12, "Docs");
    loose.labels = vec![label(3, "Frontend")];
    let mut pr = issue(13, "Fix cart");
    pr.is_pull_request = true;

    ScriptedSource::new(vec![epic, bug, feature, loose, pr])
        .with_comments(10, vec![comment(1, "bob", "confirmed")])
}

fn sample_board() -> ScriptedBoard {
    let children = [
        (10, false, "In Progress"),
        (11, false, ""),
        (13, false, "Review"),
    ];
    ScriptedBoard::default().with_epic(5, &children)
}

#[tokio::test]
async fn live_run_creates_epics_then_stories_then_labels() {
    let destination = Arc::new(RecordingDestination::new());

    let summary = run(
        config(false),
        sample_source(),
        sample_board(),
        destination.clone(),
    )
    .await
    .unwrap();

    let calls = destination.calls();
    assert!(matches!(calls[0], Call::ListProjects));
    assert!(matches!(calls[1], Call::CreateEpic(_)));
    assert!(matches!(calls[2], Call::BulkCreateStories(_)));
    let rest = &calls[3..];
    assert!(rest.iter().all(|call| matches!(call, Call::ApplyLabel(..))));

    let stories = destination.created_stories();
    let links: Vec<_> = stories
        .iter()
        .map(|s| (s.external_id.to_string(), s.epic_id))
        .collect();
    assert_eq!(
        links,
        vec![
            ("10".to_string(), Some(EpicId(501))),
            ("11".to_string(), Some(EpicId(501))),
            ("12".to_string(), None),
        ]
    );
    assert!(stories.iter().all(|s| s.project_id == Some(PROJECT_ID)));

    // Stories were created as 1000 (#10), 1001 (#11), 1002 (#12).
    assert_eq!(
        destination.applied_labels(),
        vec![
            ("Bug".to_string(), vec![StoryId(1000)]),
            ("Frontend".to_string(), vec![StoryId(1001), StoryId(1002)]),
            ("In Progress".to_string(), vec![StoryId(1000)]),
        ]
    );

    assert_eq!(summary.epics_created, 1);
    assert_eq!(summary.epic_links_set, 2);
    assert_eq!(summary.stories_created, 3);
    assert_eq!(summary.labels_applied, 3);
    assert_eq!(summary.pipeline_labels_unmatched, 1);
    assert_eq!(summary.pull_requests_skipped, 1);
}

#[tokio::test]
async fn reconciliation_links_listed_children_only() {
    let mut epic = issue(50, "Platform");
    epic.labels = vec![label(1, "Epic")];
    let source = ScriptedSource::new(vec![
        epic,
        issue(1, "One"),
        issue(2, "Two"),
        issue(3, "Three"),
        issue(4, "Four"),
    ]);
    let children = [(1, false, ""), (2, false, ""), (3, false, "")];
    let board = ScriptedBoard::default().with_epic(50, &children);
    let destination = Arc::new(RecordingDestination::new());

    run(config(false), source, board, destination.clone())
        .await
        .unwrap();

    let links: Vec<_> = destination
        .created_stories()
        .iter()
        .map(|s| s.epic_id)
        .collect();
    let epic = Some(EpicId(501));
    assert_eq!(links, vec![epic, epic, epic, None]);
}

#[tokio::test]
async fn failed_epic_is_skipped() {
    let mut first = issue(5, "Checkout");
    first.labels = vec![label(1, "Epic")];
    let mut second = issue(6, "Search");
    second.labels = vec![label(1, "Epic")];
    let source = ScriptedSource::new(vec![first, second, issue(10, "A"), issue(11, "B")]);
    let board = ScriptedBoard::default()
        .with_epic(5, &[(10, false, "")])
        .with_epic(6, &[(11, false, "")]);
    let mut destination = RecordingDestination::new();
    destination.fail_epics.insert("Checkout".to_string());
    let destination = Arc::new(destination);

    let summary = run(config(false), source, board, destination.clone())
        .await
        .unwrap();

    let links: Vec<_> = destination
        .created_stories()
        .iter()
        .map(|s| s.epic_id)
        .collect();
    assert_eq!(links, vec![None, Some(EpicId(502))]);
    assert_eq!(summary.epics_failed, 1);
    assert_eq!(summary.epics_created, 1);
    assert!(summary.has_failures());
}

#[tokio::test]
async fn failed_board_refetch_leaves_stories_unlinked() {
    let mut epic = issue(5, "Checkout");
    epic.labels = vec![label(1, "Epic")];
    let source = ScriptedSource::new(vec![epic, issue(10, "A")]);
    let board = ScriptedBoard::default().failing_on(5);
    let destination = Arc::new(RecordingDestination::new());

    let summary = run(config(false), source, board, destination.clone())
        .await
        .unwrap();

    assert_eq!(destination.created_stories()[0].epic_id, None);
    assert_eq!(summary.epics_created, 1);
    assert_eq!(summary.stories_created, 1);
    // Once while enriching, once while reconciling.
    assert_eq!(summary.board_epics_failed, 2);
}

#[tokio::test]
async fn failed_label_does_not_block_others() {
    let mut destination = RecordingDestination::new();
    destination.fail_labels.insert("Bug".to_string());
    let destination = Arc::new(destination);

    let summary = run(
        config(false),
        sample_source(),
        sample_board(),
        destination.clone(),
    )
    .await
    .unwrap();

    assert_eq!(destination.applied_labels().len(), 3);
    assert_eq!(summary.labels_failed, 1);
    assert_eq!(summary.labels_applied, 2);
}

#[tokio::test]
async fn bulk_story_failure_aborts_after_epics() {
    let mut destination = RecordingDestination::new();
    destination.fail_stories = true;
    let destination = Arc::new(destination);

    let result = run(
        config(false),
        sample_source(),
        sample_board(),
        destination.clone(),
    )
    .await;

    assert!(matches!(
        result,
        Err(RunnerError::Migration(MigrationError::StoryCreation(_)))
    ));
    let calls = destination.calls();
    assert!(calls.iter().any(|call| matches!(call, Call::CreateEpic(_))));
    assert!(destination.applied_labels().is_empty());
}

#[tokio::test]
async fn epic_only_run_skips_story_creation() {
    let mut epic = issue(5, "Checkout");
    epic.labels = vec![label(1, "Epic")];
    let source = ScriptedSource::new(vec![epic]);
    let board = ScriptedBoard::default().with_epic(5, &[]);
    let destination = Arc::new(RecordingDestination::new());

    let summary = run(config(false), source, board, destination.clone())
        .await
        .unwrap();

    let calls = destination.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[0], Call::ListProjects));
    assert!(matches!(calls[1], Call::CreateEpic(_)));
    assert!(destination.created_stories().is_empty());
    assert_eq!(summary.epics_created, 1);
    assert_eq!(summary.stories_created, 0);
}

#[tokio::test]
async fn labels_without_created_stories_are_skipped() {
    let mut destination = RecordingDestination::new();
    destination.drop_external_ids = true;
    let destination = Arc::new(destination);

    let summary = run(
        config(false),
        sample_source(),
        sample_board(),
        destination.clone(),
    )
    .await
    .unwrap();

    assert_eq!(destination.created_stories().len(), 3);
    assert!(destination.applied_labels().is_empty());
    assert_eq!(summary.labels_applied, 0);
    assert_eq!(summary.labels_skipped, 3);
    assert!(summary.all_success());
}

#[tokio::test]
async fn unknown_project_aborts_before_fetching() {
    let config = RunnerConfig::new("acme", "widgets", 4242, "Nope", false);
    let destination = Arc::new(RecordingDestination::new());

    let result = run(config, sample_source(), sample_board(), destination.clone()).await;

    assert!(matches!(
        result,
        Err(RunnerError::Migration(MigrationError::ProjectNotFound { ref name })) if name == "Nope"
    ));
    assert_eq!(destination.calls().len(), 1);
}

#[tokio::test]
async fn dry_run_writes_dump_without_destination_calls() {
    let temp = tempfile::TempDir::new().unwrap();
    let dump_path = temp.path().join("plan.json");
    let destination = Arc::new(RecordingDestination::new());

    let summary = run(
        config(true).with_dump_path(dump_path.clone()),
        sample_source(),
        sample_board(),
        destination.clone(),
    )
    .await
    .unwrap();

    assert!(destination.calls().is_empty());
    assert!(summary.dry_run);
    assert_eq!(summary.stories_converted, 3);

    let dump: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&dump_path).unwrap()).unwrap();
    assert_eq!(dump["org"], "acme");
    assert_eq!(dump["project"], common::PROJECT_NAME);
    assert!(dump.get("project_id").is_none());
    assert_eq!(dump["entities"]["epics"][0]["external_id"], "5");
    assert_eq!(dump["entities"]["stories"].as_array().unwrap().len(), 3);
    assert!(dump["entities"]["stories"][0].get("project_id").is_none());
    assert_eq!(
        dump["entities"]["labels"]["In Progress"]["issue_numbers"],
        serde_json::json!([10])
    );
}

#[tokio::test]
async fn dry_run_dump_is_byte_identical_across_runs() {
    let temp = tempfile::TempDir::new().unwrap();
    let first = temp.path().join("first.json");
    let second = temp.path().join("second.json");

    for path in [&first, &second] {
        run(
            config(true).with_dump_path(path.clone()),
            sample_source(),
            sample_board(),
            Arc::new(RecordingDestination::new()),
        )
        .await
        .unwrap();
    }

    assert_eq!(
        std::fs::read(&first).unwrap(),
        std::fs::read(&second).unwrap()
    );
}

#[tokio::test]
async fn missing_logins_are_reported_once() {
    let mut story = issue(10, "A");
    story.author = Some("stranger".to_string());
    story.assignees = vec!["stranger".to_string(), "drifter".to_string()];
    let thread = vec![comment(1, "stranger", "hi"), comment(2, "alice", "ok")];
    let source = ScriptedSource::new(vec![story]).with_comments(10, thread);

    let summary = run(
        config(false),
        source,
        ScriptedBoard::default(),
        Arc::new(RecordingDestination::new()),
    )
    .await
    .unwrap();

    assert_eq!(summary.missing_logins, vec!["drifter", "stranger"]);
}
