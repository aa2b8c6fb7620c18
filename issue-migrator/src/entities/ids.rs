//! Identifier types shared by the three systems taking part in a migration.
//!
//! GitHub, ZenHub and Clubhouse each key their records differently. The only
//! link between them is the [`ExternalRef`] stamped on every creation request,
//! so it gets its own type instead of travelling around as a bare integer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A GitHub issue number (the `#123` users see, not the global issue id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNumber(pub u64);

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlation key stored as `external_id` on Clubhouse entities.
///
/// Always the decimal rendering of the source [`IssueNumber`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalRef(String);

impl ExternalRef {
    /// Wraps an external id reported back by the destination.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw external id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the reference back into the issue number it was built from.
    ///
    /// Returns `None` for references that did not originate from an issue.
    pub fn issue_number(&self) -> Option<IssueNumber> {
        self.0.parse().ok().map(IssueNumber)
    }

    /// Whether this reference points at the given issue.
    pub fn refers_to(&self, number: IssueNumber) -> bool {
        self.0 == number.to_string()
    }
}

impl From<IssueNumber> for ExternalRef {
    fn from(number: IssueNumber) -> Self {
        Self(number.to_string())
    }
}

impl fmt::Display for ExternalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! destination_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

destination_id!(
    /// Clubhouse project id.
    ProjectId
);
destination_id!(
    /// Clubhouse epic id.
    EpicId
);
destination_id!(
    /// Clubhouse story id.
    StoryId
);
