//! Identity service: registration, login and account administration

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument, warn};

use crate::config::RegistrationConfig;
use crate::domain::auth::{
    AuthSubject, AuthenticatedPrincipal, AuthenticationError, AuthenticationGate,
    CredentialVerifier,
};
use crate::domain::role::RoleProvider;
use crate::domain::user::{
    validate_credential_secret, validate_date_of_birth, validate_email, validate_name,
    AccountStatus, NewUser, User, UserId, UserRepository, UserValidationError,
};
use crate::domain::DomainError;

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub firstname: String,
    pub lastname: String,
    pub date_of_birth: Option<NaiveDate>,
    pub email: String,
    /// Credential secret, already encoded by the credential collaborator
    pub password: String,
}

/// Request for editing profile fields; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub email: Option<String>,
}

fn invalid(e: UserValidationError) -> DomainError {
    DomainError::validation(e.to_string())
}

/// Identity service wiring the user store, role catalog and credential
/// verifier around the authentication gate
#[derive(Debug)]
pub struct IdentityService<R: UserRepository, P: RoleProvider, V: CredentialVerifier> {
    repository: Arc<R>,
    roles: Arc<P>,
    verifier: Arc<V>,
    gate: AuthenticationGate,
    registration: RegistrationConfig,
}

impl<R: UserRepository, P: RoleProvider, V: CredentialVerifier> IdentityService<R, P, V> {
    /// Create a new identity service
    pub fn new(
        repository: Arc<R>,
        roles: Arc<P>,
        verifier: Arc<V>,
        registration: RegistrationConfig,
    ) -> Self {
        Self {
            repository,
            roles,
            verifier,
            gate: AuthenticationGate::new(),
            registration,
        }
    }

    /// Register a new user with the configured default role
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> Result<User, DomainError> {
        validate_name("Firstname", &request.firstname).map_err(invalid)?;
        validate_name("Lastname", &request.lastname).map_err(invalid)?;
        validate_email(&request.email).map_err(invalid)?;
        validate_credential_secret(&request.password).map_err(invalid)?;
        if let Some(date_of_birth) = request.date_of_birth {
            validate_date_of_birth(date_of_birth, Utc::now().date_naive()).map_err(invalid)?;
        }

        if self.repository.email_exists(&request.email).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' already registered",
                request.email
            )));
        }

        let default_role = self
            .roles
            .find_by_name(&self.registration.default_role)
            .await?
            .ok_or_else(|| {
                DomainError::configuration(format!(
                    "Role '{}' was not initialized",
                    self.registration.default_role
                ))
            })?;

        let user = self
            .repository
            .create(NewUser {
                firstname: request.firstname,
                lastname: request.lastname,
                date_of_birth: request.date_of_birth,
                email: request.email,
                password: request.password,
                roles: vec![default_role],
                enabled: self.registration.enabled_on_registration,
                account_locked: false,
            })
            .await?;

        info!(user_id = %user.id(), status = %user.account_status(), "Registered user");
        Ok(user)
    }

    /// Authenticate a login attempt
    ///
    /// Account status is checked before the secret; unknown emails and wrong
    /// secrets both yield `BadCredentials`.
    #[instrument(skip(self, secret))]
    pub async fn authenticate(
        &self,
        email: &str,
        secret: &str,
    ) -> Result<AuthenticatedPrincipal, AuthenticationError> {
        let user = match self.repository.get_by_email(email).await? {
            Some(u) => u,
            None => {
                warn!("Login rejected: unknown email");
                return Err(AuthenticationError::BadCredentials);
            }
        };

        let authorities = self
            .gate
            .authenticate(&user, secret, self.verifier.as_ref())
            .inspect_err(|e| warn!(user_id = %user.id(), error = %e, "Login rejected"))?;

        info!(user_id = %user.id(), authorities = authorities.len(), "Login accepted");

        Ok(AuthenticatedPrincipal {
            user_id: user.id(),
            name: user.login_identifier().to_string(),
            full_name: user.full_name(),
            authorities,
        })
    }

    /// Get a user by ID
    pub async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }

    /// Get a user by email
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.repository.get_by_email(email).await
    }

    /// List users
    pub async fn list(&self, status: Option<AccountStatus>) -> Result<Vec<User>, DomainError> {
        self.repository.list(status).await
    }

    /// Count users
    pub async fn count(&self, status: Option<AccountStatus>) -> Result<usize, DomainError> {
        self.repository.count(status).await
    }

    /// Enable an account, e.g. after the email address was verified
    #[instrument(skip(self))]
    pub async fn activate(&self, id: UserId) -> Result<User, DomainError> {
        self.transition(id, User::enable).await
    }

    #[instrument(skip(self))]
    pub async fn disable(&self, id: UserId) -> Result<User, DomainError> {
        self.transition(id, User::disable).await
    }

    #[instrument(skip(self))]
    pub async fn lock(&self, id: UserId) -> Result<User, DomainError> {
        self.transition(id, User::lock).await
    }

    #[instrument(skip(self))]
    pub async fn unlock(&self, id: UserId) -> Result<User, DomainError> {
        self.transition(id, User::unlock).await
    }

    /// Grant a role by name; granting an already held role is a no-op
    #[instrument(skip(self))]
    pub async fn assign_role(&self, id: UserId, role_name: &str) -> Result<User, DomainError> {
        let role = self
            .roles
            .find_by_name(role_name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Role '{}' not found", role_name)))?;

        let mut user = self.get_required(id).await?;

        if !user.add_role(role) {
            return Ok(user);
        }

        let user = self.repository.update(&user).await?;
        info!(user_id = %id, role = role_name, "Role assigned");
        Ok(user)
    }

    /// Edit profile fields
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        id: UserId,
        request: UpdateProfileRequest,
    ) -> Result<User, DomainError> {
        let mut user = self.get_required(id).await?;

        if let Some(firstname) = request.firstname {
            validate_name("Firstname", &firstname).map_err(invalid)?;
            user.set_firstname(firstname);
        }

        if let Some(lastname) = request.lastname {
            validate_name("Lastname", &lastname).map_err(invalid)?;
            user.set_lastname(lastname);
        }

        if let Some(date_of_birth) = request.date_of_birth {
            validate_date_of_birth(date_of_birth, Utc::now().date_naive()).map_err(invalid)?;
            user.set_date_of_birth(Some(date_of_birth));
        }

        if let Some(email) = request.email {
            validate_email(&email).map_err(invalid)?;
            user.set_email(email);
        }

        self.repository.update(&user).await
    }

    /// Replace the stored credential secret with an already encoded one
    #[instrument(skip(self, secret))]
    pub async fn replace_credential_secret(
        &self,
        id: UserId,
        secret: impl Into<String>,
    ) -> Result<User, DomainError> {
        let secret = secret.into();
        validate_credential_secret(&secret).map_err(invalid)?;

        let mut user = self.get_required(id).await?;
        user.set_password(secret);

        self.repository.update(&user).await
    }

    async fn get_required(&self, id: UserId) -> Result<User, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    async fn transition(&self, id: UserId, apply: fn(&mut User)) -> Result<User, DomainError> {
        let mut user = self.get_required(id).await?;
        let before = user.account_status();

        apply(&mut user);

        let user = self.repository.update(&user).await?;
        info!(user_id = %id, from = %before, to = %user.account_status(), "Account status changed");
        Ok(user)
    }
}
