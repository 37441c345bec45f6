//! Authentication error types

use thiserror::Error;

use crate::domain::DomainError;

/// Account-status failure raised by the authentication gate
///
/// Each variant maps to exactly one status predicate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatusError {
    #[error("User account has expired")]
    AccountExpired,

    #[error("User account is locked")]
    AccountLocked,

    #[error("User credentials have expired")]
    CredentialsExpired,

    #[error("User account is disabled")]
    AccountDisabled,
}

impl AccountStatusError {
    /// Stable machine-readable code for callers presenting the failure
    pub fn code(&self) -> &'static str {
        match self {
            Self::AccountExpired => "account_expired",
            Self::AccountLocked => "account_locked",
            Self::CredentialsExpired => "credentials_expired",
            Self::AccountDisabled => "account_disabled",
        }
    }
}

/// Errors returned from a login attempt
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthenticationError {
    #[error(transparent)]
    Status(#[from] AccountStatusError),

    /// Unknown login identifier or wrong secret; the two are not distinguished
    #[error("Bad credentials")]
    BadCredentials,

    #[error(transparent)]
    Domain(#[from] DomainError),
}
