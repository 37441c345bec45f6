//! Read models for records that reference a user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Book identifier, assigned by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(u64);

impl BookId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A book as seen from its owner's side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedBook {
    pub id: BookId,
    pub owner_id: UserId,
    pub title: String,
    pub author_name: String,
    pub isbn: String,
    pub shareable: bool,
    pub archived: bool,
}

/// One borrow of a book by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub book_id: BookId,
    pub user_id: UserId,
    pub returned: bool,
    pub return_approved: bool,
    pub created_date: DateTime<Utc>,
}

impl TransactionRecord {
    /// Borrowed and not handed back yet
    pub fn is_outstanding(&self) -> bool {
        !self.returned
    }
}
