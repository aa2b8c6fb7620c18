#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod board;
pub mod config;
pub mod destination;
pub mod dump;
pub mod entities;
pub mod identity;
pub mod migration;
pub mod runner;
pub mod source;
pub mod summary;

pub use board::{BoardEpic, BoardError, BoardIssue, BoardOverlay, ZenHubBoard};
pub use config::{load_identities, ConfigError, IdentityConfig};
pub use destination::{
    ClubhouseDestination, CreatedEpic, CreatedStory, Destination, DestinationError, Project,
};
pub use dump::{write_dump, DumpError};
pub use entities::{
    CommentCreationRequest, Entities, EpicCreationRequest, EpicId, ExternalRef, IssueNumber,
    LabelAggregation, LabelDescriptor, ProjectId, StoryCreationRequest, StoryId, StoryKind,
    StoryLabel,
};
pub use identity::{IdentityMapper, LoginMapping, MappingTable, MissingLogins};
pub use migration::{
    add_pipeline_labels, classify, Converter, IssueKind, MigrationError, MigrationPlan, Persister,
};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use source::{GitHubIssues, IssueSource, SourceComment, SourceError, SourceIssue, SourceLabel};
pub use summary::RunSummary;
