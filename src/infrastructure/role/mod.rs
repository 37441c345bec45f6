//! Role infrastructure module

mod provider;

pub use provider::InMemoryRoleProvider;
