//! Credential verification seam

#[cfg(test)]
use mockall::automock;

/// Compares a submitted secret against the stored credential secret
///
/// The hashing scheme is owned entirely by the implementor.
#[cfg_attr(test, automock)]
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, submitted: &str, stored: &str) -> bool;
}
