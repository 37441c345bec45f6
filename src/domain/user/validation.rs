//! User validation utilities

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Pragmatic email shape check; deliverability is not our concern
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").unwrap()
});

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Email '{0}' is not well formed")]
    InvalidEmail(String),

    #[error("{0} cannot be empty")]
    EmptyName(&'static str),

    #[error("{0} exceeds maximum length of {1} characters")]
    NameTooLong(&'static str, usize),

    #[error("Date of birth {0} is in the future")]
    DateOfBirthInFuture(NaiveDate),

    #[error("Credential secret cannot be empty")]
    EmptyCredentialSecret,

    #[error("Last modification {1} precedes creation {0}")]
    ModifiedBeforeCreated(DateTime<Utc>, DateTime<Utc>),
}

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_NAME_LENGTH: usize = 100;

/// Validate an email used as login identifier
///
/// Rules:
/// - Cannot be empty
/// - Maximum 254 characters
/// - Must look like `local@domain.tld`
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    if !EMAIL_PATTERN.is_match(email) {
        return Err(UserValidationError::InvalidEmail(email.to_string()));
    }

    Ok(())
}

/// Validate a first or last name
///
/// `field` names the offending field in the error. Whitespace is not trimmed.
pub fn validate_name(field: &'static str, name: &str) -> Result<(), UserValidationError> {
    if name.is_empty() {
        return Err(UserValidationError::EmptyName(field));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(UserValidationError::NameTooLong(field, MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a date of birth against today's date
pub fn validate_date_of_birth(
    date_of_birth: NaiveDate,
    today: NaiveDate,
) -> Result<(), UserValidationError> {
    if date_of_birth > today {
        return Err(UserValidationError::DateOfBirthInFuture(date_of_birth));
    }

    Ok(())
}

/// Validate that a credential secret was supplied
///
/// The secret's format belongs to the credential collaborator; only presence
/// is checked here.
pub fn validate_credential_secret(secret: &str) -> Result<(), UserValidationError> {
    if secret.is_empty() {
        return Err(UserValidationError::EmptyCredentialSecret);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("first.last+books@mail.example.org").is_ok());
        assert!(validate_email("a_b-c@sub-domain.io").is_ok());
    }

    #[test]
    fn test_empty_email() {
        assert_eq!(validate_email(""), Err(UserValidationError::EmptyEmail));
    }

    #[test]
    fn test_email_too_long() {
        let long_email = format!("{}@example.com", "a".repeat(250));
        assert_eq!(
            validate_email(&long_email),
            Err(UserValidationError::EmailTooLong(254))
        );
    }

    #[test]
    fn test_malformed_emails() {
        for email in ["ada", "ada@", "@example.com", "ada@example", "ada @example.com"] {
            assert_eq!(
                validate_email(email),
                Err(UserValidationError::InvalidEmail(email.to_string())),
                "{email}"
            );
        }
    }

    #[test]
    fn test_valid_names() {
        assert!(validate_name("Firstname", "Ada").is_ok());
        assert!(validate_name("Lastname", "de la Cruz").is_ok());
        assert!(validate_name("Lastname", "Ørsted").is_ok());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(
            validate_name("Firstname", ""),
            Err(UserValidationError::EmptyName("Firstname"))
        );
        assert_eq!(
            UserValidationError::EmptyName("Firstname").to_string(),
            "Firstname cannot be empty"
        );
    }

    #[test]
    fn test_name_too_long() {
        let long_name = "a".repeat(101);
        assert_eq!(
            validate_name("Lastname", &long_name),
            Err(UserValidationError::NameTooLong("Lastname", 100))
        );
    }

    #[test]
    fn test_date_of_birth() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        assert!(validate_date_of_birth(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(), today).is_ok());
        assert!(validate_date_of_birth(today, today).is_ok());

        let tomorrow = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert_eq!(
            validate_date_of_birth(tomorrow, today),
            Err(UserValidationError::DateOfBirthInFuture(tomorrow))
        );
    }

    #[test]
    fn test_credential_secret() {
        assert!(validate_credential_secret("$argon2id$v=19$...").is_ok());
        assert_eq!(
            validate_credential_secret(""),
            Err(UserValidationError::EmptyCredentialSecret)
        );
    }
}
