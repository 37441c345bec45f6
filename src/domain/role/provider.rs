//! Role provider trait

use std::sync::Arc;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::Role;
use crate::domain::DomainError;

/// Read access to the externally managed role catalog
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoleProvider: Send + Sync {
    /// Find a role by its exact name
    async fn find_by_name(&self, name: &str) -> Result<Option<Arc<Role>>, DomainError>;

    /// List every known role
    async fn list(&self) -> Result<Vec<Arc<Role>>, DomainError>;
}
