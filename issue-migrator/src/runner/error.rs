//! Runner error types.

/// Errors that can occur while setting up or running a migration.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Identity table loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub client initialization errors.
    #[error(transparent)]
    Source(#[from] crate::source::SourceError),

    /// ZenHub client initialization errors.
    #[error(transparent)]
    Board(#[from] crate::board::BoardError),

    /// Clubhouse client initialization errors.
    #[error(transparent)]
    Destination(#[from] crate::destination::DestinationError),

    /// Run-level migration failure.
    #[error(transparent)]
    Migration(#[from] crate::migration::MigrationError),
}
