//! User domain
//!
//! This module provides the user aggregate, its account-status state machine,
//! input validation and the repository trait used to persist users.

mod entity;
mod repository;
mod validation;

pub use entity::{AccountStatus, NewUser, User, UserId};
pub use repository::UserRepository;
pub use validation::{
    validate_credential_secret, validate_date_of_birth, validate_email, validate_name,
    UserValidationError,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
