//! GitHub login to Clubhouse member mapping.

use std::collections::HashMap;

/// Outcome of mapping a GitHub login to a Clubhouse member id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginMapping {
    /// The login has its own entry.
    Exact(String),

    /// The login is unknown and was mapped onto the fallback member.
    Fallback(String),

    /// The login is unknown and no fallback is configured.
    NotFound,
}

impl LoginMapping {
    /// The member id, exact or fallback.
    pub fn member_id(&self) -> Option<&str> {
        match self {
            Self::Exact(id) | Self::Fallback(id) => Some(id),
            Self::NotFound => None,
        }
    }

    /// The member id only when the login mapped exactly.
    pub fn exact_id(&self) -> Option<&str> {
        match self {
            Self::Exact(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

/// Maps GitHub logins to Clubhouse member ids.
///
/// Implementations must be pure: the same login always maps the same way
/// within a run. Any closure `Fn(&str) -> LoginMapping` is a mapper.
pub trait IdentityMapper: Send + Sync {
    fn map(&self, login: &str) -> LoginMapping;
}

impl<F> IdentityMapper for F
where
    F: Fn(&str) -> LoginMapping + Send + Sync,
{
    fn map(&self, login: &str) -> LoginMapping {
        self(login)
    }
}

/// Table-backed mapper with an optional fallback member.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    logins: HashMap<String, String>,
    fallback: Option<String>,
}

impl MappingTable {
    /// Creates a table. `fallback` is a member id, not a login.
    pub fn new(logins: HashMap<String, String>, fallback: Option<String>) -> Self {
        Self { logins, fallback }
    }
}

impl IdentityMapper for MappingTable {
    fn map(&self, login: &str) -> LoginMapping {
        if let Some(id) = self.logins.get(login) {
            return LoginMapping::Exact(id.clone());
        }
        match &self.fallback {
            Some(id) => LoginMapping::Fallback(id.clone()),
            None => LoginMapping::NotFound,
        }
    }
}
