use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod auth;
pub mod health;

/// Register every route. Shared by `main.rs` and the integration tests so
/// both serve the same surface.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Auth routes: /auth/{signup,login,user}
    cfg.service(web::scope("/auth").configure(auth::configure_routes));
}

/// Fallback for unmatched paths so they get a Problem Details body too.
pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(ErrorCode::NotFound, "Route not found"))
}
