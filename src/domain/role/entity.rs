//! Role entity and related types

use serde::{Deserialize, Serialize};

use super::validation::{validate_role_name, RoleValidationError};

/// Role identifier, assigned by the role store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(u64);

impl RoleId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named role granted to users
///
/// Roles are owned by the role store; users hold them through shared
/// references and only ever read `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoleRecord")]
pub struct Role {
    id: RoleId,
    name: String,
}

/// Unchecked wire shape of a role
#[derive(Deserialize)]
struct RoleRecord {
    id: RoleId,
    name: String,
}

impl TryFrom<RoleRecord> for Role {
    type Error = RoleValidationError;

    fn try_from(record: RoleRecord) -> Result<Self, Self::Error> {
        Self::new(record.id, record.name)
    }
}

impl Role {
    /// Create a new role after validating its name
    pub fn new(id: RoleId, name: impl Into<String>) -> Result<Self, RoleValidationError> {
        let name = name.into();
        validate_role_name(&name)?;
        Ok(Self { id, name })
    }

    pub fn id(&self) -> RoleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
