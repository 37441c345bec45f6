//! Domain layer - Core identity and authorization model

pub mod auth;
pub mod error;
pub mod library;
pub mod role;
pub mod user;

pub use auth::{
    AccountStatusError, AuthSubject, AuthenticatedPrincipal, AuthenticationError,
    AuthenticationGate, CredentialVerifier, GrantedAuthority, Principal, StatusPredicates,
};
pub use error::DomainError;
pub use library::{
    BookId, BookOwnershipLookup, OwnedBook, TransactionHistoryLookup, TransactionRecord,
};
pub use role::{Role, RoleId, RoleProvider, RoleValidationError};
pub use user::{AccountStatus, NewUser, User, UserId, UserRepository, UserValidationError};
