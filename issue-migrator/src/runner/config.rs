//! Runner configuration.

use std::path::{Path, PathBuf};

/// Parameters of a single migration run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// GitHub organization owning the repository.
    org: String,
    /// GitHub repository to migrate.
    repo: String,
    /// ZenHub (GitHub) repository id used for board lookups.
    repo_id: u64,
    /// Name of the Clubhouse project receiving the stories.
    project: String,
    /// Whether to dump the plan instead of creating anything.
    dry_run: bool,
    /// Where the dry-run dump goes; stdout when unset.
    dump_path: Option<PathBuf>,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(
        org: impl Into<String>,
        repo: impl Into<String>,
        repo_id: u64,
        project: impl Into<String>,
        dry_run: bool,
    ) -> Self {
        Self {
            org: org.into(),
            repo: repo.into(),
            repo_id,
            project: project.into(),
            dry_run,
            dump_path: None,
        }
    }

    /// Writes the dry-run dump to a file instead of stdout.
    pub fn with_dump_path(mut self, dump_path: PathBuf) -> Self {
        self.dump_path = Some(dump_path);
        self
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn repo_id(&self) -> u64 {
        self.repo_id
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the dump file path, if any.
    pub fn dump_path(&self) -> Option<&Path> {
        self.dump_path.as_deref()
    }
}
