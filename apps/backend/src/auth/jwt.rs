use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use super::claims::Claims;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Why a presented token was refused. Only ever logged; callers answer every
/// variant with the same public "Invalid Token" error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    Expired,
    BadSignature,
    Malformed,
}

impl TokenRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenRejection::Expired => "token_expired",
            TokenRejection::BadSignature => "invalid_signature",
            TokenRejection::Malformed => "malformed_token",
        }
    }
}

/// Issues and checks HS256 access tokens with a fixed lifetime.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    header: Header,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenSigner {
    pub fn new(security: &SecurityConfig) -> Self {
        let mut validation = Validation::new(security.algorithm);
        // Expiry is exact: a token is dead the second `exp` passes.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(&security.jwt_secret),
            decoding: DecodingKey::from_secret(&security.jwt_secret),
            header: Header::new(security.algorithm),
            validation,
            ttl_secs: i64::try_from(security.token_ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    /// Sign `{displayName, email, iat, exp}` with `iat` taken from `now`.
    pub fn issue(&self, display_name: &str, email: &str, now: SystemTime) -> Result<String, AppError> {
        let iat = now
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AppError::internal("Failed to get current time"))?
            .as_secs() as i64;

        let claims = Claims {
            display_name: display_name.to_string(),
            email: email.to_string(),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };

        encode(&self.header, &claims, &self.encoding)
            .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenRejection> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenRejection::Expired,
                ErrorKind::InvalidSignature => TokenRejection::BadSignature,
                _ => TokenRejection::Malformed,
            })
    }
}
