//! Identity table deserialization.

use super::ConfigError;
use crate::identity::MappingTable;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Parsed contents of an identities file.
///
/// ```toml
/// fallback-login = "frazerbot"
///
/// [logins]
/// haleyrc = "5eaad9b2-d01b-4614-93f4-8f265a8ed5f8"
/// frazerbot = "5eaae91d-64c0-46aa-a2c7-4441babe7a31"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IdentityConfig {
    /// Login whose member id stands in for unknown logins.
    pub fallback_login: Option<String>,

    /// GitHub login to Clubhouse member id.
    #[serde(default)]
    pub logins: HashMap<String, String>,
}

impl IdentityConfig {
    /// Checks the table loaded from `path` for empty ids and a dangling
    /// fallback login.
    pub(crate) fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let mut empty: Vec<String> = self
            .logins
            .iter()
            .filter(|(_, id)| id.trim().is_empty())
            .map(|(login, _)| login.clone())
            .collect();
        if !empty.is_empty() {
            empty.sort_unstable();
            return Err(ConfigError::EmptyMemberId {
                path: path.display().to_string(),
                logins: empty,
            });
        }

        if let Some(login) = &self.fallback_login {
            if !self.logins.contains_key(login) {
                return Err(ConfigError::DanglingFallback {
                    path: path.display().to_string(),
                    login: login.clone(),
                });
            }
        }

        Ok(())
    }

    /// Builds the mapper used during conversion.
    pub fn into_mapping_table(self) -> MappingTable {
        let fallback = self
            .fallback_login
            .as_ref()
            .and_then(|login| self.logins.get(login).cloned());
        MappingTable::new(self.logins, fallback)
    }
}
