//! Sign-in, per-read re-validation and signup relay.
//!
//! The bridge never decides who a user is; it asks the backend each time and
//! mirrors the answer into the session envelope.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::client::{BackendClient, Forwarded, SignupForm};
use crate::error::BridgeError;
use crate::session::SessionEnvelope;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub name: String,
    pub email: String,
}

/// What `GET /api/auth/session` returns for a live session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user: SessionUser,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub expires: String,
}

/// Result of reading a session: the (possibly newly marked) envelope and,
/// if it is still good, the session to hand out.
#[derive(Debug, Clone)]
pub struct Materialized {
    pub envelope: SessionEnvelope,
    pub session: Option<Session>,
}

pub struct SessionBridge {
    client: Arc<dyn BackendClient>,
    max_age: Duration,
}

impl SessionBridge {
    pub fn new(client: Arc<dyn BackendClient>, max_age: Duration) -> Self {
        Self { client, max_age }
    }

    /// Exchange credentials for an envelope. Every failure, including an
    /// unreachable backend, is `InvalidCredentials`.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        now: SystemTime,
    ) -> Result<SessionEnvelope, BridgeError> {
        if email.is_empty() || password.is_empty() {
            return Err(BridgeError::InvalidCredentials);
        }

        let access_token = match self.client.login(email, password).await {
            Ok(Some(token)) => token,
            Ok(None) => return Err(BridgeError::InvalidCredentials),
            Err(e) => {
                warn!(error = %e, "Sign-in failed: backend login call");
                return Err(BridgeError::InvalidCredentials);
            }
        };

        let user = match self.client.current_user(&access_token).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!("Sign-in failed: freshly issued token was not accepted");
                return Err(BridgeError::InvalidCredentials);
            }
            Err(e) => {
                warn!(error = %e, "Sign-in failed: backend user call");
                return Err(BridgeError::InvalidCredentials);
            }
        };

        let iat = now
            .duration_since(UNIX_EPOCH)
            .map_err(|_| BridgeError::Internal("Failed to get current time".into()))?
            .as_secs() as i64;
        let max_age = i64::try_from(self.max_age.as_secs()).unwrap_or(i64::MAX);

        info!("Session established");
        Ok(SessionEnvelope {
            access_token,
            display_name: user.display_name,
            email: user.email,
            error: None,
            iat,
            exp: iat.saturating_add(max_age),
        })
    }

    /// Re-check the held access token with the backend. Any failure marks the
    /// envelope; a marked envelope never yields a session again.
    pub async fn materialize(&self, mut envelope: SessionEnvelope) -> Materialized {
        if envelope.is_marked() {
            return Materialized {
                envelope,
                session: None,
            };
        }

        let still_valid = match self.client.current_user(&envelope.access_token).await {
            Ok(Some(_)) => true,
            Ok(None) => {
                info!("Access token no longer valid; signing out");
                false
            }
            Err(e) => {
                warn!(error = %e, "Access token check failed; signing out");
                false
            }
        };

        if !still_valid {
            envelope.mark_invalid();
            return Materialized {
                envelope,
                session: None,
            };
        }

        let session = Session {
            user: SessionUser {
                name: envelope.display_name.clone(),
                email: envelope.email.clone(),
            },
            access_token: envelope.access_token.clone(),
            expires: format_expiry(envelope.exp),
        };
        Materialized {
            envelope,
            session: Some(session),
        }
    }

    /// Relay a signup to the backend and pass its answer through.
    pub async fn sign_up(&self, form: &SignupForm) -> Result<Forwarded, BridgeError> {
        self.client.signup(form).await
    }
}

fn format_expiry(exp: i64) -> String {
    OffsetDateTime::from_unix_timestamp(exp)
        .ok()
        .and_then(|t| t.format(&Rfc3339).ok())
        .unwrap_or_default()
}
