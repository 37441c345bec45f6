//! Authentication domain
//!
//! Capability traits implemented by identities, the status-checking
//! authentication gate and its error taxonomy.

mod capability;
mod credentials;
mod error;
mod gate;
mod principal;

pub use capability::{AuthSubject, GrantedAuthority, Principal, StatusPredicates};
pub use credentials::CredentialVerifier;
pub use error::{AccountStatusError, AuthenticationError};
pub use gate::AuthenticationGate;
pub use principal::AuthenticatedPrincipal;

#[cfg(test)]
pub use credentials::MockCredentialVerifier;
