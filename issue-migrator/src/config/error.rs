//! Identities file errors.

use thiserror::Error;

/// Errors that can occur while loading the identities file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No identities file at the given path.
    #[error("Identities file not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read identities file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the identities layout.
    #[error("Failed to parse identities file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Logins mapped to a blank Clubhouse member id.
    #[error("Identities file '{path}' has empty member ids for: {}", .logins.join(", "))]
    EmptyMemberId { path: String, logins: Vec<String> },

    /// `fallback-login` names a login with no `[logins]` entry.
    #[error("Identities file '{path}' names fallback-login '{login}' but has no entry for it")]
    DanglingFallback { path: String, login: String },
}
