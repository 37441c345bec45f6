//! Per-user view over books and borrow history

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use crate::domain::library::{
    BookOwnershipLookup, OwnedBook, TransactionHistoryLookup, TransactionRecord,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Everything the library stores know about one user
#[derive(Debug, Clone, Serialize)]
pub struct LibraryOverview {
    pub user_id: UserId,
    pub owned_books: Vec<OwnedBook>,
    pub history: Vec<TransactionRecord>,
}

impl LibraryOverview {
    /// Borrows not yet handed back
    pub fn outstanding(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.history.iter().filter(|r| r.is_outstanding())
    }
}

/// Resolves a user's back-references on demand
pub struct UserLibraryService<B: BookOwnershipLookup, H: TransactionHistoryLookup> {
    books: Arc<B>,
    history: Arc<H>,
}

impl<B: BookOwnershipLookup, H: TransactionHistoryLookup> UserLibraryService<B, H> {
    pub fn new(books: Arc<B>, history: Arc<H>) -> Self {
        Self { books, history }
    }

    #[instrument(skip(self))]
    pub async fn owned_books(&self, user_id: UserId) -> Result<Vec<OwnedBook>, DomainError> {
        self.books.books_owned_by(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn history(&self, user_id: UserId) -> Result<Vec<TransactionRecord>, DomainError> {
        self.history.history_of(user_id).await
    }

    /// Fetch both collections concurrently
    #[instrument(skip(self))]
    pub async fn overview(&self, user_id: UserId) -> Result<LibraryOverview, DomainError> {
        let (owned_books, history) = tokio::try_join!(
            self.books.books_owned_by(user_id),
            self.history.history_of(user_id)
        )?;

        Ok(LibraryOverview {
            user_id,
            owned_books,
            history,
        })
    }
}
