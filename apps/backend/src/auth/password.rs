//! bcrypt password hashing.
//!
//! Both operations are CPU-bound by design of the work factor; async callers
//! run them through `tokio::task::spawn_blocking`.

use crate::AppError;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Salted bcrypt hash in modular-crypt form (`$2b$<cost>$...`).
    ///
    /// bcrypt only reads the first 72 bytes of `plain`; anything after that
    /// does not affect the hash.
    pub fn hash(&self, plain: &str) -> Result<String, AppError> {
        bcrypt::hash(plain, self.cost)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
    }

    /// True only when `plain` matches `hash`. A malformed or empty stored hash
    /// never matches.
    pub fn verify(&self, plain: &str, hash: &str) -> bool {
        if hash.is_empty() {
            return false;
        }
        bcrypt::verify(plain, hash).unwrap_or(false)
    }
}
