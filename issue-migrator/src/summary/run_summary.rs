//! Run summary types.

/// Summary of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Whether this was a dry run.
    pub dry_run: bool,

    /// Number of issues fetched from GitHub, pull requests included.
    pub issues_fetched: usize,

    /// Number of pull requests skipped.
    pub pull_requests_skipped: usize,

    /// Number of epic requests built.
    pub epics_converted: usize,

    /// Number of story requests built.
    pub stories_converted: usize,

    /// Number of pipeline labels attached to stories.
    pub pipeline_labels_attached: usize,

    /// Number of pipeline children that matched no story, such as pull
    /// requests. Informational only.
    pub pipeline_labels_unmatched: usize,

    /// Number of ZenHub epics that could not be read.
    pub board_epics_failed: usize,

    /// Number of epics created in Clubhouse.
    pub epics_created: usize,

    /// Number of epics that failed to create.
    pub epics_failed: usize,

    /// Number of story requests linked to a created epic.
    pub epic_links_set: usize,

    /// Number of stories created in Clubhouse.
    pub stories_created: usize,

    /// Number of labels applied.
    pub labels_applied: usize,

    /// Number of labels that failed to apply.
    pub labels_failed: usize,

    /// Number of labels with no created story to apply to.
    pub labels_skipped: usize,

    /// GitHub logins that had no exact Clubhouse member, sorted.
    pub missing_logins: Vec<String>,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Returns true if any recoverable failure occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.epics_failed > 0 || self.labels_failed > 0 || self.board_epics_failed > 0
    }

    /// Returns true if every attempted operation succeeded.
    #[must_use]
    pub fn all_success(&self) -> bool {
        !self.has_failures()
    }
}
