//! Calls from the bridge to the auth backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BridgeError;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Identity as reported by `GET /auth/user`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendUser {
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct LoginReply {
    access_token: Option<String>,
}

/// Signup payload relayed verbatim to the backend.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A backend response passed through to the browser unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forwarded {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// The three backend calls the bridge makes. Transport failures are errors;
/// a reachable backend that says no is `Ok(None)`.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// `POST /auth/login`; the access token on success.
    async fn login(&self, email: &str, password: &str) -> Result<Option<String>, BridgeError>;

    /// `GET /auth/user` with the bearer token; the identity while it is valid.
    async fn current_user(&self, access_token: &str) -> Result<Option<BackendUser>, BridgeError>;

    /// `POST /auth/signup`, whatever the outcome.
    async fn signup(&self, form: &SignupForm) -> Result<Forwarded, BridgeError>;
}

/// `BackendClient` over HTTP. Clone is cheap; `reqwest::Client` pools
/// connections behind an `Arc`.
#[derive(Clone)]
pub struct HttpBackendClient {
    http: Client,
    base_url: String,
}

impl HttpBackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BridgeError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| BridgeError::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn unavailable(e: reqwest::Error) -> BridgeError {
    BridgeError::BackendUnavailable(e.to_string())
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    async fn login(&self, email: &str, password: &str) -> Result<Option<String>, BridgeError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(unavailable)?;

        if !response.status().is_success() {
            debug!(status = response.status().as_u16(), "Backend refused login");
            return Ok(None);
        }

        // A 2xx without a usable token is treated as a refusal.
        let reply: LoginReply = match response.json().await {
            Ok(reply) => reply,
            Err(e) => {
                debug!(error = %e, "Backend login reply was not JSON");
                return Ok(None);
            }
        };
        Ok(reply.access_token.filter(|t| !t.is_empty()))
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<BackendUser>, BridgeError> {
        let response = self
            .http
            .get(self.url("/auth/user"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(unavailable)?;

        match response.status() {
            status if status.is_success() => match response.json::<BackendUser>().await {
                Ok(user) => Ok(Some(user)),
                Err(e) => {
                    debug!(error = %e, "Backend user reply was not understood");
                    Ok(None)
                }
            },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status => {
                debug!(status = status.as_u16(), "Unexpected status from /auth/user");
                Ok(None)
            }
        }
    }

    async fn signup(&self, form: &SignupForm) -> Result<Forwarded, BridgeError> {
        let response = self
            .http
            .post(self.url("/auth/signup"))
            .json(form)
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(unavailable)?.to_vec();

        Ok(Forwarded {
            status,
            content_type,
            body,
        })
    }
}
