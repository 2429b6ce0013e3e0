use std::time::SystemTime;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bridge::SessionBridge;
use crate::client::SignupForm;
use crate::error::BridgeError;
use crate::session::{SessionCodec, SESSION_COOKIE};

/// Shared per-process bridge state.
pub struct BridgeState {
    pub bridge: SessionBridge,
    pub codec: SessionCodec,
    pub cookie_secure: bool,
}

impl BridgeState {
    fn session_cookie(&self, value: String) -> Cookie<'static> {
        let max_age = i64::try_from(self.codec.max_age().as_secs()).unwrap_or(i64::MAX);
        Cookie::build(SESSION_COOKIE, value)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.cookie_secure)
            .max_age(CookieDuration::seconds(max_age))
            .finish()
    }

    fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.cookie_secure)
            .finish();
        cookie.make_removal();
        cookie
    }
}

#[derive(Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for CredentialsForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct OkBody {
    ok: bool,
}

/// `POST /api/auth/callback/credentials`, JSON or urlencoded.
async fn credentials_callback(
    body: web::Either<web::Json<CredentialsForm>, web::Form<CredentialsForm>>,
    state: web::Data<BridgeState>,
) -> Result<HttpResponse, BridgeError> {
    let form = match body {
        web::Either::Left(json) => json.into_inner(),
        web::Either::Right(form) => form.into_inner(),
    };

    let envelope = state
        .bridge
        .sign_in(&form.email, &form.password, SystemTime::now())
        .await?;
    let sealed = state.codec.seal(&envelope)?;

    Ok(HttpResponse::Ok()
        .cookie(state.session_cookie(sealed))
        .json(OkBody { ok: true }))
}

/// `GET /api/auth/session`: re-validates the held token on every read.
async fn session(
    req: HttpRequest,
    state: web::Data<BridgeState>,
) -> Result<HttpResponse, BridgeError> {
    let Some(cookie) = req.cookie(SESSION_COOKIE) else {
        return Ok(not_authenticated(&state));
    };

    let Some(envelope) = state.codec.open(cookie.value()) else {
        return Ok(not_authenticated(&state));
    };

    let materialized = state.bridge.materialize(envelope).await;
    match materialized.session {
        Some(session) => Ok(HttpResponse::Ok()
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(session)),
        None => {
            debug!(marked = materialized.envelope.is_marked(), "Session ended");
            Ok(not_authenticated(&state))
        }
    }
}

fn not_authenticated(state: &BridgeState) -> HttpResponse {
    let mut resp = BridgeError::NotAuthenticated.error_response();
    if let Err(e) = resp.add_cookie(&state.removal_cookie()) {
        debug!(error = %e, "Failed to attach session removal cookie");
    }
    resp
}

/// `POST /api/auth/signout`.
async fn signout(state: web::Data<BridgeState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(state.removal_cookie())
        .json(OkBody { ok: true })
}

/// `POST /api/proxy/auth/signup`: the backend's answer, unchanged.
async fn signup_proxy(
    body: web::Json<SignupForm>,
    state: web::Data<BridgeState>,
) -> Result<HttpResponse, BridgeError> {
    let forwarded = state.bridge.sign_up(&body.into_inner()).await?;

    let status = actix_web::http::StatusCode::from_u16(forwarded.status)
        .map_err(|_| BridgeError::BackendUnavailable(format!("bad status {}", forwarded.status)))?;
    let mut builder = HttpResponse::build(status);
    if let Some(content_type) = forwarded.content_type {
        builder.insert_header((header::CONTENT_TYPE, content_type));
    }
    Ok(builder.body(forwarded.body))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .service(
                web::resource("/callback/credentials")
                    .route(web::post().to(credentials_callback)),
            )
            .service(web::resource("/session").route(web::get().to(session)))
            .service(web::resource("/signout").route(web::post().to(signout))),
    )
    .service(
        web::scope("/api/proxy/auth")
            .service(web::resource("/signup").route(web::post().to(signup_proxy))),
    );
}
