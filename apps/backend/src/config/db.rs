use super::must_var;
use crate::error::AppError;

/// Connection string for the credential store.
///
/// Accepts anything sea-orm understands; in practice `postgres://...` in
/// deployments and `sqlite::memory:` or `sqlite://path?mode=rwc` locally.
pub fn database_url() -> Result<String, AppError> {
    must_var("DATABASE_URL")
}

/// True for the in-process SQLite URL, which needs a single pooled connection
/// so every query sees the same database.
pub fn is_sqlite_memory(url: &str) -> bool {
    url.starts_with("sqlite::memory:") || url.contains("mode=memory")
}
