use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::config::{must_var, parse_var_or};
use crate::error::AppError;

pub const DEFAULT_BCRYPT_COST: u32 = 10;
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 30;
/// Work-factor range accepted by bcrypt.
pub const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Signing and hashing settings shared by the token signer and the hasher.
#[derive(Clone)]
pub struct SecurityConfig {
    /// HMAC key for signing and verifying access tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm (HS256)
    pub algorithm: Algorithm,
    /// Lifetime of an access token from the moment it is issued
    pub token_ttl: Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Reads `JWT_SECRET` (required), `JWT_TTL_SECS` and `BCRYPT_COST`.
    pub fn from_env() -> Result<Self, AppError> {
        let secret = must_var("JWT_SECRET")?;
        let ttl_secs = parse_var_or("JWT_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?;
        let cost = parse_var_or("BCRYPT_COST", DEFAULT_BCRYPT_COST)?;

        let config = Self::new(secret.into_bytes())
            .with_token_ttl(Duration::from_secs(ttl_secs))
            .with_bcrypt_cost(cost);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.is_empty() {
            return Err(AppError::config("JWT secret must not be empty"));
        }
        if self.token_ttl.is_zero() {
            return Err(AppError::config("Token TTL must be at least one second"));
        }
        if !BCRYPT_COST_RANGE.contains(&self.bcrypt_cost) {
            return Err(AppError::config(format!(
                "BCRYPT_COST must be between {} and {}, got {}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end(),
                self.bcrypt_cost
            )));
        }
        Ok(())
    }

    /// Cheapest bcrypt cost and a throwaway secret, for tests.
    pub fn for_tests() -> Self {
        Self::new(b"test_secret_do_not_use_in_prod".to_vec()).with_bcrypt_cost(*BCRYPT_COST_RANGE.start())
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::*;

    fn clear_env() {
        env::remove_var("JWT_SECRET");
        env::remove_var("JWT_TTL_SECS");
        env::remove_var("BCRYPT_COST");
    }

    #[test]
    #[serial]
    fn from_env_requires_secret() {
        clear_env();
        let err = SecurityConfig::from_env().unwrap_err();
        assert!(err.detail().contains("JWT_SECRET"));
    }

    #[test]
    #[serial]
    fn from_env_applies_defaults() {
        clear_env();
        env::set_var("JWT_SECRET", "s3cret");
        let cfg = SecurityConfig::from_env().unwrap();
        assert_eq!(cfg.jwt_secret, b"s3cret");
        assert_eq!(cfg.token_ttl, Duration::from_secs(30));
        assert_eq!(cfg.bcrypt_cost, 10);
        assert_eq!(cfg.algorithm, Algorithm::HS256);
        clear_env();
    }

    #[test]
    #[serial]
    fn from_env_reads_overrides_and_rejects_bad_cost() {
        clear_env();
        env::set_var("JWT_SECRET", "s3cret");
        env::set_var("JWT_TTL_SECS", "900");
        env::set_var("BCRYPT_COST", "12");
        let cfg = SecurityConfig::from_env().unwrap();
        assert_eq!(cfg.token_ttl, Duration::from_secs(900));
        assert_eq!(cfg.bcrypt_cost, 12);

        env::set_var("BCRYPT_COST", "3");
        assert!(SecurityConfig::from_env().is_err());
        clear_env();
    }

    #[test]
    fn debug_hides_secret() {
        let rendered = format!("{:?}", SecurityConfig::new(b"hunter2".to_vec()));
        assert!(!rendered.contains("hunter2"));
    }
}
