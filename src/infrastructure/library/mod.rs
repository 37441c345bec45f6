//! Library infrastructure module
//!
//! In-memory book/history records and the per-user overview service.

mod records;
mod service;

pub use records::InMemoryLibraryRecords;
pub use service::{LibraryOverview, UserLibraryService};
