use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::services::{LoginRequest, SignupRequest};
use crate::state::app_state::AppState;

pub const SIGNUP_SUCCESS_MESSAGE: &str = "User created successfully";

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
}

/// `POST /auth/signup`. The created record is never echoed back.
async fn signup(
    body: ValidatedJson<SignupRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state.auth.register(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(SignupResponse {
        message: SIGNUP_SUCCESS_MESSAGE,
    }))
}

/// `POST /auth/login` -> `{access_token}`.
async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let response = app_state.auth.login(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// `GET /auth/user` -> the verified claims of the bearer token.
async fn user(current: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(current.claims))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/signup").route(web::post().to(signup)))
        .service(web::resource("/login").route(web::post().to(login)))
        .service(web::resource("/user").route(web::get().to(user)));
}
