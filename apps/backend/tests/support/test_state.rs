use std::time::Duration;

use backend::infra::state::build_state;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use backend::AppError;

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

/// Cheap bcrypt, fixed secret, default 30s tokens.
pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET).with_bcrypt_cost(4)
}

/// Memory-backed state.
pub async fn memory_state() -> Result<AppState, AppError> {
    build_state().with_security(test_security()).build().await
}

/// SQLite-backed state with migrations applied.
pub async fn sqlite_state(ttl: Duration) -> Result<AppState, AppError> {
    build_state()
        .with_security(test_security().with_token_ttl(ttl))
        .with_db("sqlite::memory:")
        .build()
        .await
}
