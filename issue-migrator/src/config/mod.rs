//! Configuration loading.
//!
//! The only configuration file is the identity table mapping GitHub logins to
//! Clubhouse member ids. Run parameters live in [`crate::runner::RunnerConfig`].

mod error;
mod identity;

pub use error::ConfigError;
pub use identity::IdentityConfig;

use std::path::Path;
use tracing::{debug, info};

/// Loads and validates an identities file.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] when the file does not exist,
/// [`ConfigError::Parse`] when it does not parse,
/// [`ConfigError::EmptyMemberId`] when a login maps to a blank id and
/// [`ConfigError::DanglingFallback`] when the fallback login has no entry.
pub fn load_identities(path: &Path) -> Result<IdentityConfig, ConfigError> {
    info!(path = %path.display(), "Loading identity table");

    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        source: e,
    })?;

    let config = parse_identities(&content, path)?;
    debug!(count = config.logins.len(), "Loaded identity table");
    Ok(config)
}

fn parse_identities(content: &str, path: &Path) -> Result<IdentityConfig, ConfigError> {
    let config: IdentityConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;

    config.validate(path)?;
    Ok(config)
}
