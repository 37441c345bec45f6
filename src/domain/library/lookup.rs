//! Lookups into stores that reference users
//!
//! Books and borrow history are owned elsewhere; the identity model only
//! reaches them through these capabilities, on demand.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{OwnedBook, TransactionRecord};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Fetch the books a user owns
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BookOwnershipLookup: Send + Sync {
    async fn books_owned_by(&self, user_id: UserId) -> Result<Vec<OwnedBook>, DomainError>;
}

/// Fetch a user's borrow history, oldest first
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransactionHistoryLookup: Send + Sync {
    async fn history_of(&self, user_id: UserId) -> Result<Vec<TransactionRecord>, DomainError>;
}
