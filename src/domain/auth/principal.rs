//! Outcome of a successful login

use serde::{Deserialize, Serialize};

use super::capability::{GrantedAuthority, Principal};
use crate::domain::user::UserId;

/// Identity handed to session/token issuance after the gate accepted a login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedPrincipal {
    pub user_id: UserId,
    /// Login identifier (the user's email)
    pub name: String,
    pub full_name: String,
    pub authorities: Vec<GrantedAuthority>,
}

impl AuthenticatedPrincipal {
    /// Check whether a specific authority was granted
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a.as_str() == authority)
    }
}

impl Principal for AuthenticatedPrincipal {
    fn name(&self) -> &str {
        &self.name
    }
}
