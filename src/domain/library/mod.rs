//! Library domain
//!
//! Read-only views of books and borrow history keyed by user.

mod entity;
mod lookup;

pub use entity::{BookId, OwnedBook, TransactionRecord};
pub use lookup::{BookOwnershipLookup, TransactionHistoryLookup};

#[cfg(test)]
pub use lookup::{MockBookOwnershipLookup, MockTransactionHistoryLookup};
