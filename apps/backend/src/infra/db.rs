use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::is_sqlite_memory;
use crate::error::AppError;

fn connect_options(database_url: &str) -> ConnectOptions {
    let mut opt = ConnectOptions::new(database_url.to_owned());
    if is_sqlite_memory(database_url) {
        // Each pooled connection would otherwise get its own empty database.
        opt.min_connections(1).max_connections(1);
    } else {
        opt.max_connections(10)
            .connect_timeout(Duration::from_secs(5))
            .acquire_timeout(Duration::from_secs(5));
    }
    opt.sqlx_logging(false);
    opt
}

/// Open a connection pool. Does NOT run migrations.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = Database::connect(connect_options(database_url)).await?;
    Ok(conn)
}

/// Connect and bring the schema up to date. Single entrypoint used by the
/// binary and by store tests.
pub async fn bootstrap_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(database_url).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(backend = ?conn.get_database_backend(), "database ready");
    Ok(conn)
}
