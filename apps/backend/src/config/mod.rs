//! Environment-driven configuration helpers.

pub mod db;

use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Get required environment variable or return error.
pub fn must_var(name: &str) -> Result<String, AppError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::config(format!(
            "Required environment variable '{name}' is not set"
        ))),
    }
}

/// Parse an optional environment variable, falling back to `default` when unset.
///
/// A value that is present but unparseable is a configuration error rather
/// than a silent fallback.
pub fn parse_var_or<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map_err(|e| {
            AppError::config(format!("Environment variable '{name}' is invalid: {e}"))
        }),
        _ => Ok(default),
    }
}
