//! In-memory book ownership and borrow history records

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::library::{
    BookOwnershipLookup, OwnedBook, TransactionHistoryLookup, TransactionRecord,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// In-memory stand-in for the catalog and transaction stores
#[derive(Debug, Default)]
pub struct InMemoryLibraryRecords {
    books: Arc<RwLock<Vec<OwnedBook>>>,
    history: Arc<RwLock<Vec<TransactionRecord>>>,
}

impl InMemoryLibraryRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_book(&self, book: OwnedBook) {
        self.books.write().await.push(book);
    }

    pub async fn add_transaction(&self, record: TransactionRecord) {
        self.history.write().await.push(record);
    }
}

#[async_trait]
impl BookOwnershipLookup for InMemoryLibraryRecords {
    async fn books_owned_by(&self, user_id: UserId) -> Result<Vec<OwnedBook>, DomainError> {
        let books = self.books.read().await;

        Ok(books
            .iter()
            .filter(|b| b.owner_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TransactionHistoryLookup for InMemoryLibraryRecords {
    async fn history_of(&self, user_id: UserId) -> Result<Vec<TransactionRecord>, DomainError> {
        let history = self.history.read().await;

        let mut records: Vec<TransactionRecord> = history
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.created_date);

        Ok(records)
    }
}
