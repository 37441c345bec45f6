//! Role validation utilities

use thiserror::Error;

/// Errors that can occur during role validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RoleValidationError {
    #[error("Role name cannot be empty")]
    EmptyName,
}

/// Validate a role name
///
/// Only emptiness is rejected. Any other name is accepted as-is because it is
/// granted verbatim as an authority.
pub fn validate_role_name(name: &str) -> Result<(), RoleValidationError> {
    if name.is_empty() {
        return Err(RoleValidationError::EmptyName);
    }

    Ok(())
}
