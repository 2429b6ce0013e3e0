use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use super::auth_token::bearer_token;
use crate::auth::claims::Claims;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Identity behind a verified bearer token. Stateless: the store is not
/// consulted, the signed claims are the source of truth until they expire.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub claims: Claims,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(current_user(req))
    }
}

fn current_user(req: &HttpRequest) -> Result<CurrentUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    let token = bearer_token(req)?;
    let claims = state.auth.validate_token(&token)?;
    Ok(CurrentUser { claims })
}
