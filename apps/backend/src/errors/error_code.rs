//! Error codes for the auth API.
//!
//! Every code that can appear in a response body is a variant here; never
//! pass ad-hoc strings as error codes. Each maps 1:1 to a
//! SCREAMING_SNAKE_CASE string.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Wrong password or unknown email (deliberately indistinguishable)
    InvalidCredentials,
    /// Token failed verification (expired, tampered or malformed)
    InvalidToken,

    // Request validation
    /// One or more fields failed validation
    ValidationError,
    /// Body could not be read or parsed
    BadRequest,

    // Conflicts
    /// Email already registered
    UserAlreadyExists,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // Not found
    /// Generic not found
    NotFound,

    // System errors
    /// Storage write failed while registering
    UserCreateFailed,
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// The exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::Conflict => "CONFLICT",

            Self::NotFound => "NOT_FOUND",

            Self::UserCreateFailed => "USER_CREATE_FAILED",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// All variants, for uniqueness checks in tests.
    pub const ALL: &'static [ErrorCode] = &[
        Self::UnauthorizedMissingBearer,
        Self::InvalidCredentials,
        Self::InvalidToken,
        Self::ValidationError,
        Self::BadRequest,
        Self::UserAlreadyExists,
        Self::Conflict,
        Self::NotFound,
        Self::UserCreateFailed,
        Self::DbError,
        Self::DbUnavailable,
        Self::Internal,
        Self::ConfigError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn codes_are_screaming_snake_case() {
        for code in ErrorCode::ALL {
            let s = code.as_str();
            assert!(
                s.chars().all(|c| c.is_ascii_uppercase() || c == '_'),
                "{s} is not SCREAMING_SNAKE_CASE"
            );
        }
    }

    #[test]
    fn codes_are_unique() {
        let seen: HashSet<&str> = ErrorCode::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(seen.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", ErrorCode::InvalidToken), "INVALID_TOKEN");
        assert_eq!(
            format!("{}", ErrorCode::UserAlreadyExists),
            "USER_ALREADY_EXISTS"
        );
    }
}
