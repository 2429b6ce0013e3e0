//! The session envelope and its cookie encoding.
//!
//! The envelope travels in an HTTP-only cookie as an HS256 JWT signed with
//! the bridge's own secret, so the browser can hold it but not alter it.

use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BridgeError;

pub const SESSION_COOKIE: &str = "bridge.session-token";

/// Marker set when the held access token stopped validating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionError {
    AccessTokenError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEnvelope {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "name")]
    pub display_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SessionError>,
    /// Session start (seconds since epoch)
    pub iat: i64,
    /// Session end; independent of the access token's own expiry
    pub exp: i64,
}

impl SessionEnvelope {
    pub fn is_marked(&self) -> bool {
        self.error.is_some()
    }

    pub fn mark_invalid(&mut self) {
        self.error = Some(SessionError::AccessTokenError);
    }
}

/// Seals envelopes into cookie values and opens them again.
#[derive(Clone)]
pub struct SessionCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    max_age: Duration,
}

impl SessionCodec {
    pub fn new(secret: &[u8], max_age: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            max_age,
        }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    pub fn seal(&self, envelope: &SessionEnvelope) -> Result<String, BridgeError> {
        encode(&Header::new(Algorithm::HS256), envelope, &self.encoding)
            .map_err(|e| BridgeError::Internal(format!("Failed to seal session: {e}")))
    }

    /// `None` for anything not sealed by this codec or past its `exp`.
    pub fn open(&self, cookie_value: &str) -> Option<SessionEnvelope> {
        match decode::<SessionEnvelope>(cookie_value, &self.decoding, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(reason = ?e.kind(), "Session cookie rejected");
                None
            }
        }
    }
}
