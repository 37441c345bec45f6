//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{AccountStatus, NewUser, User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// Implementations assign identifiers, enforce email uniqueness and stamp
/// `last_modified_date` on every update.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their email (for login)
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Store a new user under a freshly assigned ID
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// List all users (optionally filtered by account status)
    async fn list(&self, status: Option<AccountStatus>) -> Result<Vec<User>, DomainError>;

    /// Count users (optionally filtered by account status)
    async fn count(&self, status: Option<AccountStatus>) -> Result<usize, DomainError>;

    /// Check if a user ID exists
    async fn exists(&self, id: UserId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }

    /// Check if an email is already registered
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_email(email).await?.is_some())
    }
}
