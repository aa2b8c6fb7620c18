//! Orchestrates a migration run.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::board::BoardOverlay;
use crate::destination::Destination;
use crate::dump::{write_dump, DumpError};
use crate::entities::ProjectId;
use crate::identity::{IdentityMapper, MissingLogins};
use crate::migration::{add_pipeline_labels, Converter, MigrationError, MigrationPlan, Persister};
use crate::source::IssueSource;
use crate::summary::RunSummary;
use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

/// Sequences conversion, pipeline enrichment and persistence (or a dry-run
/// dump) for one repository.
pub struct Runner {
    config: RunnerConfig,
    source: Arc<dyn IssueSource>,
    board: Arc<dyn BoardOverlay>,
    destination: Arc<dyn Destination>,
    mapper: Arc<dyn IdentityMapper>,
}

impl Runner {
    /// Builds a runner from its configuration and collaborators.
    pub fn new(
        config: RunnerConfig,
        source: Arc<dyn IssueSource>,
        board: Arc<dyn BoardOverlay>,
        destination: Arc<dyn Destination>,
        mapper: Arc<dyn IdentityMapper>,
    ) -> Self {
        Self {
            config,
            source,
            board,
            destination,
            mapper,
        }
    }

    /// Executes the full migration flow.
    ///
    /// Logins without an exact mapping are reported once at the end, whether
    /// or not the run succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Migration`] for any run-level failure.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(self.config.dry_run());
        let mut missing = MissingLogins::new();

        let span = info_span!(
            "migrate",
            org = %self.config.org(),
            repo = %self.config.repo(),
            dry_run = self.config.dry_run()
        );
        let outcome = self
            .execute(&mut missing, &mut summary)
            .instrument(span)
            .await;

        for login in missing.iter() {
            warn!(login, "No exact Clubhouse member for GitHub login");
        }
        outcome?;

        summary.missing_logins = missing.into_sorted_vec();
        Ok(summary)
    }

    async fn execute(
        &self,
        missing: &mut MissingLogins,
        summary: &mut RunSummary,
    ) -> Result<(), MigrationError> {
        let project_id = if self.config.dry_run() {
            None
        } else {
            Some(self.resolve_project().await?)
        };

        let converter = Converter::new(
            self.source.as_ref(),
            self.mapper.as_ref(),
            self.config.org(),
            self.config.repo(),
            project_id,
        );
        let mut entities = converter.convert(missing, summary).await?;

        add_pipeline_labels(
            self.board.as_ref(),
            self.config.repo_id(),
            &mut entities,
            summary,
        )
        .await;

        if self.config.dry_run() {
            let plan = MigrationPlan {
                org: self.config.org().to_string(),
                repo: self.config.repo().to_string(),
                repo_id: self.config.repo_id(),
                project: self.config.project().to_string(),
                entities,
            };
            return self.dump(&plan);
        }

        Persister::new(
            self.destination.as_ref(),
            self.board.as_ref(),
            self.config.repo_id(),
        )
        .persist(entities, summary)
        .await?;

        Ok(())
    }

    async fn resolve_project(&self) -> Result<ProjectId, MigrationError> {
        let name = self.config.project();
        info!(project = %name, "Resolving Clubhouse project");

        let projects = self
            .destination
            .list_projects()
            .await
            .map_err(MigrationError::ProjectListing)?;

        projects
            .into_iter()
            .find(|project| project.name == name)
            .map(|project| project.id)
            .ok_or_else(|| MigrationError::ProjectNotFound {
                name: name.to_string(),
            })
    }

    fn dump(&self, plan: &MigrationPlan) -> Result<(), MigrationError> {
        match self.config.dump_path() {
            Some(path) => {
                info!(path = %path.display(), "Writing dry-run dump");
                let file = File::create(path).map_err(DumpError::from)?;
                write_dump(plan, BufWriter::new(file))?;
            }
            None => write_dump(plan, std::io::stdout().lock())?,
        }
        Ok(())
    }
}
