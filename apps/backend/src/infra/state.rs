use std::sync::Arc;

use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::repos::{MemoryUserStore, SeaUserStore, UserStore};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    database_url: Option<String>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::for_tests(),
            database_url: None,
        }
    }

    /// Back the store with a database instead of memory.
    pub fn with_db(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = Some(database_url.into());
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        self.security_config.validate()?;

        let store: Arc<dyn UserStore> = match self.database_url {
            // single entrypoint: connect + migrate
            Some(url) => Arc::new(SeaUserStore::new(bootstrap_db(&url).await?)),
            None => Arc::new(MemoryUserStore::new()),
        };
        Ok(AppState::new(store, self.security_config))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
