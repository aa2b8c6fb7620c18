//! Identity mapping between GitHub logins and Clubhouse members.

mod mapping;
mod missing;

pub use mapping::{IdentityMapper, LoginMapping, MappingTable};
pub use missing::MissingLogins;
