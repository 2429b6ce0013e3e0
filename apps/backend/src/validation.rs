//! Input validation for signup and login payloads.
//!
//! Each function returns every violation it finds; an empty list means the
//! input is acceptable. Nothing here touches the store or the hasher.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MIN_DISPLAY_NAME_CHARS: usize = 3;
pub const MIN_PASSWORD_CHARS: usize = 8;

/// local@label(.label)+ with no whitespace and no empty domain labels.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn validate_display_name(display_name: &str) -> Option<FieldError> {
    if display_name.trim().chars().count() < MIN_DISPLAY_NAME_CHARS {
        return Some(FieldError::new(
            "displayName",
            "Name must be at least 3 characters long",
        ));
    }
    None
}

pub fn validate_email(email: &str) -> Option<FieldError> {
    if !is_valid_email(email) {
        return Some(FieldError::new(
            "email",
            "Please enter a valid email address",
        ));
    }
    None
}

/// Password policy: at least 8 characters with a letter, a digit and a
/// non-alphanumeric character. All violated rules are reported.
pub fn validate_password(password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if password.chars().count() < MIN_PASSWORD_CHARS {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 8 characters",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        errors.push(FieldError::new(
            "password",
            "Password must contain at least one letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(FieldError::new(
            "password",
            "Password must contain at least one number",
        ));
    }
    if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        errors.push(FieldError::new(
            "password",
            "Password must contain at least one special character",
        ));
    }

    errors
}

pub fn validate_signup(display_name: &str, email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    errors.extend(validate_display_name(display_name));
    errors.extend(validate_email(email));
    errors.extend(validate_password(password));
    errors
}

/// Login only checks shape; the policy is not re-applied to existing passwords.
pub fn validate_login(email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    errors.extend(validate_email(email));
    if password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }
    errors
}
