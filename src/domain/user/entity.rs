//! User entity and related types

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::auth::{AuthSubject, GrantedAuthority, Principal};
use crate::domain::role::Role;

use super::validation::UserValidationError;

/// User identifier, assigned by the persistence store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Observable account status, derived from the `enabled` and
/// `account_locked` flags
///
/// Every combination is legal and stable; only `Active` can log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Enabled and not locked
    Active,
    /// Enabled but locked
    Locked,
    /// Not enabled, not locked (e.g. awaiting activation)
    Disabled,
    /// Neither enabled nor unlocked
    DisabledAndLocked,
}

impl AccountStatus {
    pub fn from_flags(enabled: bool, account_locked: bool) -> Self {
        match (enabled, account_locked) {
            (true, false) => Self::Active,
            (true, true) => Self::Locked,
            (false, false) => Self::Disabled,
            (false, true) => Self::DisabledAndLocked,
        }
    }

    /// Check if the account can pass the authentication gate
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Active | Self::Locked)
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked | Self::DisabledAndLocked)
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Locked => write!(f, "locked"),
            Self::Disabled => write!(f, "disabled"),
            Self::DisabledAndLocked => write!(f, "disabled_and_locked"),
        }
    }
}

/// Data for a user that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewUser {
    pub firstname: String,
    pub lastname: String,
    pub date_of_birth: Option<NaiveDate>,
    pub email: String,
    /// Credential secret, already encoded by the credential collaborator
    pub password: String,
    pub roles: Vec<Arc<Role>>,
    pub enabled: bool,
    pub account_locked: bool,
}

impl NewUser {
    /// Materialize the user under the identifier assigned by the store
    pub fn into_user(self, id: UserId) -> User {
        let mut user = User::new(id, self.firstname, self.lastname, self.email, self.password)
            .with_roles(self.roles);
        user.date_of_birth = self.date_of_birth;
        user.enabled = self.enabled;
        user.account_locked = self.account_locked;
        user
    }
}

/// A registered user of the book network
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "UserRecord")]
pub struct User {
    id: UserId,
    firstname: String,
    lastname: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    date_of_birth: Option<NaiveDate>,
    /// Unique login identifier
    email: String,
    /// Opaque credential secret - never exposed in serialization
    #[serde(skip_serializing, default)]
    password: String,
    account_locked: bool,
    enabled: bool,
    /// Shared with the role store, in grant order
    roles: Vec<Arc<Role>>,
    created_date: DateTime<Utc>,
    /// Stamped by the persistence layer on every update
    #[serde(skip_serializing_if = "Option::is_none", default)]
    last_modified_date: Option<DateTime<Utc>>,
}

/// Unchecked wire shape of a user
#[derive(Deserialize)]
struct UserRecord {
    id: UserId,
    firstname: String,
    lastname: String,
    #[serde(default)]
    date_of_birth: Option<NaiveDate>,
    email: String,
    #[serde(default)]
    password: String,
    account_locked: bool,
    enabled: bool,
    roles: Vec<Arc<Role>>,
    created_date: DateTime<Utc>,
    #[serde(default)]
    last_modified_date: Option<DateTime<Utc>>,
}

impl TryFrom<UserRecord> for User {
    type Error = UserValidationError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        if let Some(modified) = record.last_modified_date {
            if modified < record.created_date {
                return Err(UserValidationError::ModifiedBeforeCreated(
                    record.created_date,
                    modified,
                ));
            }
        }

        Ok(Self {
            id: record.id,
            firstname: record.firstname,
            lastname: record.lastname,
            date_of_birth: record.date_of_birth,
            email: record.email,
            password: record.password,
            account_locked: record.account_locked,
            enabled: record.enabled,
            roles: record.roles,
            created_date: record.created_date,
            last_modified_date: record.last_modified_date,
        })
    }
}

impl User {
    /// Create a user with no roles, not enabled and not locked
    pub fn new(
        id: UserId,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id,
            firstname: firstname.into(),
            lastname: lastname.into(),
            date_of_birth: None,
            email: email.into(),
            password: password.into(),
            account_locked: false,
            enabled: false,
            roles: Vec::new(),
            created_date: Utc::now(),
            last_modified_date: None,
        }
    }

    /// Set roles (builder pattern)
    pub fn with_roles(mut self, roles: Vec<Arc<Role>>) -> Self {
        self.roles = roles;
        self
    }

    /// Set date of birth (builder pattern)
    pub fn with_date_of_birth(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn roles(&self) -> &[Arc<Role>] {
        &self.roles
    }

    pub fn is_account_locked(&self) -> bool {
        self.account_locked
    }

    pub fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    pub fn last_modified_date(&self) -> Option<DateTime<Utc>> {
        self.last_modified_date
    }

    /// `firstname + " " + lastname`, recomputed on every call
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }

    pub fn account_status(&self) -> AccountStatus {
        AccountStatus::from_flags(self.enabled, self.account_locked)
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r.name() == name)
    }

    // Mutators

    pub fn set_firstname(&mut self, firstname: impl Into<String>) {
        self.firstname = firstname.into();
    }

    pub fn set_lastname(&mut self, lastname: impl Into<String>) {
        self.lastname = lastname.into();
    }

    pub fn set_date_of_birth(&mut self, date_of_birth: Option<NaiveDate>) {
        self.date_of_birth = date_of_birth;
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Replace the stored credential secret
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn set_roles(&mut self, roles: Vec<Arc<Role>>) {
        self.roles = roles;
    }

    /// Append a role unless one with the same name is already granted
    ///
    /// Returns `true` if the role was added.
    pub fn add_role(&mut self, role: Arc<Role>) -> bool {
        if self.has_role(role.name()) {
            return false;
        }
        self.roles.push(role);
        true
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn lock(&mut self) {
        self.account_locked = true;
    }

    pub fn unlock(&mut self) {
        self.account_locked = false;
    }

    /// Record a persisted modification; never earlier than `created_date`
    pub(crate) fn mark_modified(&mut self, at: DateTime<Utc>) {
        self.last_modified_date = Some(at.max(self.created_date));
    }
}

impl AuthSubject for User {
    fn authorities(&self) -> Vec<GrantedAuthority> {
        self.roles
            .iter()
            .map(|role| GrantedAuthority::new(role.name()))
            .collect()
    }

    fn credential_secret(&self) -> &str {
        &self.password
    }

    fn login_identifier(&self) -> &str {
        &self.email
    }

    /// Account expiry is not tracked; reserved for a future expiry policy
    fn not_expired_account(&self) -> bool {
        true
    }

    fn not_locked_account(&self) -> bool {
        !self.account_locked
    }

    /// Credential expiry is not tracked; reserved for a future rotation policy
    fn credentials_not_expired(&self) -> bool {
        true
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Principal for User {
    fn name(&self) -> &str {
        &self.email
    }
}
