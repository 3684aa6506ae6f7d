//! Business-provider validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::domain::validation::ValidationPattern;

/// Errors that can occur during provider validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProviderValidationError {
    #[error("Provider ID cannot be empty")]
    EmptyId,

    #[error("Provider ID exceeds maximum length of {0} characters")]
    IdTooLong(usize),

    #[error("Provider ID contains invalid character: '{0}'. Only alphanumeric characters and hyphens are allowed")]
    InvalidIdCharacter(char),

    #[error("Provider ID must start and end with a letter or number")]
    InvalidIdBoundary,

    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username is too short. Minimum length is {0} characters")]
    UsernameTooShort(usize),

    #[error("Username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("Username contains invalid character: '{0}'. Only alphanumeric characters, underscores, and hyphens are allowed")]
    InvalidUsernameCharacter(char),

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),

    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),

    #[error("Display name must be letter groups separated by single spaces, got '{0}'")]
    InvalidDisplayName(String),
}

const MAX_PROVIDER_ID_LENGTH: usize = 50;
const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 50;
const MIN_PASSWORD_LENGTH: usize = 4;
const MAX_PASSWORD_LENGTH: usize = 128;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Validate a provider ID
///
/// Rules:
/// - Cannot be empty
/// - Maximum 50 characters
/// - Only alphanumeric characters and hyphens
/// - Must start and end with alphanumeric
pub fn validate_provider_id(id: &str) -> Result<(), ProviderValidationError> {
    if id.is_empty() {
        return Err(ProviderValidationError::EmptyId);
    }

    if id.len() > MAX_PROVIDER_ID_LENGTH {
        return Err(ProviderValidationError::IdTooLong(MAX_PROVIDER_ID_LENGTH));
    }

    let first = id.chars().next().unwrap();
    let last = id.chars().next_back().unwrap();

    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        return Err(ProviderValidationError::InvalidIdBoundary);
    }

    for c in id.chars() {
        if !c.is_ascii_alphanumeric() && c != '-' {
            return Err(ProviderValidationError::InvalidIdCharacter(c));
        }
    }

    Ok(())
}

/// Validate a username
///
/// Rules:
/// - Minimum 3 characters, maximum 50
/// - Only alphanumeric characters, underscores, and hyphens
pub fn validate_username(username: &str) -> Result<(), ProviderValidationError> {
    if username.is_empty() {
        return Err(ProviderValidationError::EmptyUsername);
    }

    if username.len() < MIN_USERNAME_LENGTH {
        return Err(ProviderValidationError::UsernameTooShort(
            MIN_USERNAME_LENGTH,
        ));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ProviderValidationError::UsernameTooLong(
            MAX_USERNAME_LENGTH,
        ));
    }

    for c in username.chars() {
        if !c.is_ascii_alphanumeric() && c != '_' && c != '-' {
            return Err(ProviderValidationError::InvalidUsernameCharacter(c));
        }
    }

    Ok(())
}

/// Validate a plaintext password before it is hashed
pub fn validate_password(password: &str) -> Result<(), ProviderValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ProviderValidationError::PasswordTooShort(
            MIN_PASSWORD_LENGTH,
        ));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ProviderValidationError::PasswordTooLong(
            MAX_PASSWORD_LENGTH,
        ));
    }

    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), ProviderValidationError> {
    if EMAIL.is_match(email) {
        Ok(())
    } else {
        Err(ProviderValidationError::InvalidEmail(email.to_string()))
    }
}

/// Validate a human display name against the letters-with-space pattern
pub fn validate_display_name(name: &str) -> Result<(), ProviderValidationError> {
    if ValidationPattern::LettersWithSpace.is_match(name) {
        Ok(())
    } else {
        Err(ProviderValidationError::InvalidDisplayName(name.to_string()))
    }
}
