//! Tracking of logins that had no exact mapping.

use std::collections::BTreeSet;

/// Logins seen during a run that did not map exactly.
///
/// Owned by the runner and reported once when the run ends.
#[derive(Debug, Clone, Default)]
pub struct MissingLogins {
    logins: BTreeSet<String>,
}

impl MissingLogins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, login: &str) {
        self.logins.insert(login.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.logins.is_empty()
    }

    /// Missing logins in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.logins.iter().map(String::as_str)
    }

    pub fn into_sorted_vec(self) -> Vec<String> {
        self.logins.into_iter().collect()
    }
}
