//! Book Network Identity
//!
//! Identity and authorization model for the book network:
//! - Users with profile data, a credential secret and account-status flags
//! - Role-based granted authorities, in role order
//! - An authentication gate mapping each failed status predicate to its own error
//! - In-memory reference stores and an identity service for registration,
//!   login and account administration

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    AccountStatus, AccountStatusError, AuthSubject, AuthenticatedPrincipal, AuthenticationError,
    AuthenticationGate, CredentialVerifier, DomainError, GrantedAuthority, Principal, Role,
    RoleId, User, UserId,
};
pub use infrastructure::user::IdentityService;
