//! User infrastructure module
//!
//! In-memory user store and the identity service that drives registration,
//! login and account administration.

mod repository;
mod service;

pub use repository::InMemoryUserRepository;
pub use service::{IdentityService, RegisterRequest, UpdateProfileRequest};
