#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use async_trait::async_trait;
use session_bridge::{
    configure, BackendClient, BackendUser, BridgeError, BridgeState, Forwarded, SessionBridge,
    SessionCodec, SignupForm, SESSION_COOKIE,
};

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub const SESSION_SECRET: &[u8] = b"bridge_test_session_secret";
pub const JANE_EMAIL: &str = "jane@x.com";
pub const JANE_PASSWORD: &str = "Abc12345!";

/// In-process stand-in for the auth backend: one known account, revocable
/// tokens, and call counters.
#[derive(Default)]
pub struct FakeBackend {
    tokens: Mutex<HashMap<String, BackendUser>>,
    issued: AtomicUsize,
    pub login_calls: AtomicUsize,
    pub user_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn revoke_all(&self) {
        self.tokens.lock().unwrap().clear();
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackendClient for FakeBackend {
    async fn login(&self, email: &str, password: &str) -> Result<Option<String>, BridgeError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if email != JANE_EMAIL || password != JANE_PASSWORD {
            return Ok(None);
        }
        let n = self.issued.fetch_add(1, Ordering::SeqCst);
        let token = format!("fake-token-{n}");
        self.tokens.lock().unwrap().insert(
            token.clone(),
            BackendUser {
                display_name: "Jane Doe".into(),
                email: email.into(),
                iat: 0,
                exp: 30,
            },
        );
        Ok(Some(token))
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<BackendUser>, BridgeError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tokens.lock().unwrap().get(access_token).cloned())
    }

    async fn signup(&self, form: &SignupForm) -> Result<Forwarded, BridgeError> {
        if form.email == JANE_EMAIL {
            return Ok(Forwarded {
                status: 409,
                content_type: Some("application/problem+json".into()),
                body: br#"{"code":"USER_ALREADY_EXISTS","detail":"User already exists"}"#.to_vec(),
            });
        }
        Ok(Forwarded {
            status: 201,
            content_type: Some("application/json".into()),
            body: br#"{"message":"User created successfully"}"#.to_vec(),
        })
    }
}

pub fn bridge_state(client: Arc<dyn BackendClient>) -> web::Data<BridgeState> {
    let max_age = Duration::from_secs(3600);
    web::Data::new(BridgeState {
        bridge: SessionBridge::new(client, max_age),
        codec: SessionCodec::new(SESSION_SECRET, max_age),
        cookie_secure: false,
    })
}

/// The bridge's routes over the given backend client.
pub async fn bridge_app(
    client: Arc<dyn BackendClient>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(bridge_state(client))
            .configure(configure),
    )
    .await
}

pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}

/// A `Set-Cookie` that clears the session.
pub fn is_removal(cookie: &Cookie<'_>) -> bool {
    cookie.value().is_empty()
        && cookie
            .max_age()
            .map(|age| age.is_zero())
            .unwrap_or(false)
}
