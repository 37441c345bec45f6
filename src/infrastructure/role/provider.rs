//! In-memory role provider

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::role::{Role, RoleId, RoleProvider};
use crate::domain::DomainError;

/// In-memory role catalog keyed by role name
#[derive(Debug, Default)]
pub struct InMemoryRoleProvider {
    roles: Arc<RwLock<HashMap<String, Arc<Role>>>>,
}

impl InMemoryRoleProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the catalog with the given role names, assigning IDs in order
    pub fn with_names<I, S>(names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roles = HashMap::new();

        for (index, name) in names.into_iter().enumerate() {
            let role = Role::new(RoleId::new(index as u64 + 1), name)
                .map_err(|e| DomainError::validation(e.to_string()))?;
            roles.insert(role.name().to_string(), Arc::new(role));
        }

        Ok(Self {
            roles: Arc::new(RwLock::new(roles)),
        })
    }

    /// Add a role, replacing any role with the same name
    pub async fn insert(&self, role: Role) -> Arc<Role> {
        let role = Arc::new(role);
        let mut roles = self.roles.write().await;
        roles.insert(role.name().to_string(), Arc::clone(&role));
        role
    }
}

#[async_trait]
impl RoleProvider for InMemoryRoleProvider {
    async fn find_by_name(&self, name: &str) -> Result<Option<Arc<Role>>, DomainError> {
        let roles = self.roles.read().await;
        Ok(roles.get(name).cloned())
    }

    async fn list(&self) -> Result<Vec<Arc<Role>>, DomainError> {
        let roles = self.roles.read().await;

        let mut result: Vec<Arc<Role>> = roles.values().cloned().collect();
        result.sort_by_key(|r| r.id());

        Ok(result)
    }
}
