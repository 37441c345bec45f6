//! Capabilities an identity exposes to the authentication layer

use serde::{Deserialize, Serialize};

/// A single authority granted to an authenticated subject
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantedAuthority(String);

impl GrantedAuthority {
    pub fn new(authority: impl Into<String>) -> Self {
        Self(authority.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GrantedAuthority {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for GrantedAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of the four account-status predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPredicates {
    pub account_non_expired: bool,
    pub account_non_locked: bool,
    pub credentials_non_expired: bool,
    pub enabled: bool,
}

impl StatusPredicates {
    /// True only when every predicate holds
    pub fn is_usable(&self) -> bool {
        self.account_non_expired
            && self.account_non_locked
            && self.credentials_non_expired
            && self.enabled
    }
}

/// Identity that names itself to the outside world
pub trait Principal {
    fn name(&self) -> &str;
}

/// Subject that can be put through the authentication gate
///
/// Implementors must be pure: every method is a function of the subject's
/// current fields, with no I/O and no caching.
pub trait AuthSubject {
    /// Authorities granted to this subject, in a stable order
    fn authorities(&self) -> Vec<GrantedAuthority>;

    /// Stored credential secret, returned as-is
    fn credential_secret(&self) -> &str;

    /// Canonical identity key used to look the subject up
    fn login_identifier(&self) -> &str;

    fn not_expired_account(&self) -> bool;

    fn not_locked_account(&self) -> bool;

    fn credentials_not_expired(&self) -> bool;

    fn is_enabled(&self) -> bool;

    fn status_predicates(&self) -> StatusPredicates {
        StatusPredicates {
            account_non_expired: self.not_expired_account(),
            account_non_locked: self.not_locked_account(),
            credentials_non_expired: self.credentials_not_expired(),
            enabled: self.is_enabled(),
        }
    }
}
