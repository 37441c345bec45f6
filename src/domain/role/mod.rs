//! Role domain
//!
//! Roles are referenced by users and translated into granted authorities.

mod entity;
mod provider;
mod validation;

pub use entity::{Role, RoleId};
pub use provider::RoleProvider;
pub use validation::{validate_role_name, RoleValidationError};

#[cfg(test)]
pub use provider::MockRoleProvider;
