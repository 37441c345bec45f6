//! Authentication gate
//!
//! Turns the status predicates of an [`AuthSubject`] into an accept/reject
//! decision. Predicates are evaluated in a fixed order and the first failing
//! one decides the error:
//!
//! 1. account expired
//! 2. account disabled
//! 3. account locked
//! 4. credentials expired
//!
//! Status checks always run before the submitted secret is compared, so a
//! rejected account never reveals whether its password was right.

use tracing::debug;

use super::capability::{AuthSubject, GrantedAuthority, StatusPredicates};
use super::credentials::CredentialVerifier;
use super::error::{AccountStatusError, AuthenticationError};

const CHECK_ORDER: [AccountStatusError; 4] = [
    AccountStatusError::AccountExpired,
    AccountStatusError::AccountDisabled,
    AccountStatusError::AccountLocked,
    AccountStatusError::CredentialsExpired,
];

fn fails(check: AccountStatusError, predicates: &StatusPredicates) -> bool {
    match check {
        AccountStatusError::AccountExpired => !predicates.account_non_expired,
        AccountStatusError::AccountDisabled => !predicates.enabled,
        AccountStatusError::AccountLocked => !predicates.account_non_locked,
        AccountStatusError::CredentialsExpired => !predicates.credentials_non_expired,
    }
}

/// Stateless gate applied to every login attempt
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthenticationGate;

impl AuthenticationGate {
    pub fn new() -> Self {
        Self
    }

    /// Check the subject's account status, reporting the first failed predicate
    pub fn check<S>(&self, subject: &S) -> Result<(), AccountStatusError>
    where
        S: AuthSubject + ?Sized,
    {
        let predicates = subject.status_predicates();

        match CHECK_ORDER.into_iter().find(|check| fails(*check, &predicates)) {
            Some(failure) => {
                debug!(
                    login = subject.login_identifier(),
                    reason = failure.code(),
                    "Account status check failed"
                );
                Err(failure)
            }
            None => Ok(()),
        }
    }

    /// Every failed predicate, in evaluation order
    pub fn all_failures<S>(&self, subject: &S) -> Vec<AccountStatusError>
    where
        S: AuthSubject + ?Sized,
    {
        let predicates = subject.status_predicates();

        CHECK_ORDER
            .into_iter()
            .filter(|check| fails(*check, &predicates))
            .collect()
    }

    /// Full login decision: status first, then the submitted secret
    ///
    /// Returns the subject's granted authorities on success.
    pub fn authenticate<S, V>(
        &self,
        subject: &S,
        submitted_secret: &str,
        verifier: &V,
    ) -> Result<Vec<GrantedAuthority>, AuthenticationError>
    where
        S: AuthSubject + ?Sized,
        V: CredentialVerifier + ?Sized,
    {
        self.check(subject)?;

        if !verifier.verify(submitted_secret, subject.credential_secret()) {
            return Err(AuthenticationError::BadCredentials);
        }

        Ok(subject.authorities())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::credentials::MockCredentialVerifier;
    use crate::domain::role::{Role, RoleId};
    use crate::domain::user::{User, UserId};
    use mockall::predicate::eq;
    use std::sync::Arc;

    struct StubSubject {
        predicates: StatusPredicates,
    }

    impl AuthSubject for StubSubject {
        fn authorities(&self) -> Vec<GrantedAuthority> {
            vec![GrantedAuthority::new("USER")]
        }

        fn credential_secret(&self) -> &str {
            "stored"
        }

        fn login_identifier(&self) -> &str {
            "stub@example.com"
        }

        fn not_expired_account(&self) -> bool {
            self.predicates.account_non_expired
        }

        fn not_locked_account(&self) -> bool {
            self.predicates.account_non_locked
        }

        fn credentials_not_expired(&self) -> bool {
            self.predicates.credentials_non_expired
        }

        fn is_enabled(&self) -> bool {
            self.predicates.enabled
        }
    }

    fn stub(expired: bool, locked: bool, credentials_expired: bool, enabled: bool) -> StubSubject {
        StubSubject {
            predicates: StatusPredicates {
                account_non_expired: !expired,
                account_non_locked: !locked,
                credentials_non_expired: !credentials_expired,
                enabled,
            },
        }
    }

    fn user_with_flags(enabled: bool, locked: bool) -> User {
        let role = Arc::new(Role::new(RoleId::new(1), "USER").unwrap());
        let mut user = User::new(
            UserId::new(1),
            "Ada",
            "Lovelace",
            "ada@example.com",
            "$argon2id$stored",
        )
        .with_roles(vec![role]);

        if enabled {
            user.enable();
        }
        if locked {
            user.lock();
        }
        user
    }

    #[test]
    fn test_gate_accepts_only_active_accounts() {
        let gate = AuthenticationGate::new();

        let cases = [
            (true, false, Ok(())),
            (true, true, Err(AccountStatusError::AccountLocked)),
            (false, false, Err(AccountStatusError::AccountDisabled)),
            (false, true, Err(AccountStatusError::AccountDisabled)),
        ];

        for (enabled, locked, expected) in cases {
            let user = user_with_flags(enabled, locked);
            assert_eq!(
                gate.check(&user),
                expected,
                "enabled={enabled}, locked={locked}"
            );
        }
    }

    #[test]
    fn test_disabled_and_locked_reports_disabled_first() {
        let gate = AuthenticationGate::new();
        let user = user_with_flags(false, true);

        assert_eq!(gate.check(&user), Err(AccountStatusError::AccountDisabled));
        assert_eq!(
            gate.all_failures(&user),
            vec![
                AccountStatusError::AccountDisabled,
                AccountStatusError::AccountLocked
            ]
        );
    }

    #[test]
    fn test_check_order_for_reserved_predicates() {
        let gate = AuthenticationGate::new();

        let everything_failed = stub(true, true, true, false);
        assert_eq!(
            gate.check(&everything_failed),
            Err(AccountStatusError::AccountExpired)
        );
        assert_eq!(
            gate.all_failures(&everything_failed),
            vec![
                AccountStatusError::AccountExpired,
                AccountStatusError::AccountDisabled,
                AccountStatusError::AccountLocked,
                AccountStatusError::CredentialsExpired,
            ]
        );

        let only_credentials = stub(false, false, true, true);
        assert_eq!(
            gate.check(&only_credentials),
            Err(AccountStatusError::CredentialsExpired)
        );
    }

    #[test]
    fn test_all_failures_empty_for_usable_subject() {
        let gate = AuthenticationGate::new();
        assert!(gate.all_failures(&stub(false, false, false, true)).is_empty());
    }

    #[test]
    fn test_authenticate_success_returns_authorities() {
        let gate = AuthenticationGate::new();
        let user = user_with_flags(true, false);

        let mut verifier = MockCredentialVerifier::new();
        verifier
            .expect_verify()
            .with(eq("secret"), eq("$argon2id$stored"))
            .times(1)
            .return_const(true);

        let authorities = gate.authenticate(&user, "secret", &verifier).unwrap();
        assert_eq!(authorities, vec![GrantedAuthority::new("USER")]);
    }

    #[test]
    fn test_authenticate_wrong_secret() {
        let gate = AuthenticationGate::new();
        let user = user_with_flags(true, false);

        let mut verifier = MockCredentialVerifier::new();
        verifier.expect_verify().times(1).return_const(false);

        assert_eq!(
            gate.authenticate(&user, "wrong", &verifier),
            Err(AuthenticationError::BadCredentials)
        );
    }

    #[test]
    fn test_authenticate_checks_status_before_secret() {
        let gate = AuthenticationGate::new();
        let user = user_with_flags(false, false);

        let mut verifier = MockCredentialVerifier::new();
        verifier.expect_verify().never();

        assert_eq!(
            gate.authenticate(&user, "secret", &verifier),
            Err(AuthenticationError::Status(AccountStatusError::AccountDisabled))
        );
    }
}
