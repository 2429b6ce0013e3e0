use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::auth::jwt::TokenSigner;
use crate::auth::password::PasswordHasher;
use crate::repos::{MemoryUserStore, UserStore};
use crate::services::AuthService;

/// Shared per-process state handed to every actix worker via `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub security: SecurityConfig,
}

impl AppState {
    /// Wire the auth service from a store and security settings.
    pub fn new(store: Arc<dyn UserStore>, security: SecurityConfig) -> Self {
        let auth = AuthService::new(
            store,
            PasswordHasher::new(security.bcrypt_cost),
            TokenSigner::new(&security),
        );
        Self {
            auth: Arc::new(auth),
            security,
        }
    }

    /// In-memory store; nothing outlives the process.
    pub fn in_memory(security: SecurityConfig) -> Self {
        Self::new(Arc::new(MemoryUserStore::new()), security)
    }

    pub fn store_backend(&self) -> &'static str {
        self.auth.store().backend()
    }

    pub fn for_tests() -> Self {
        Self::in_memory(SecurityConfig::for_tests())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store_backend())
            .field("security", &self.security)
            .finish()
    }
}
