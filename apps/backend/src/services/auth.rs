//! Registration, login and token validation.
//!
//! Login walks `Received -> Validated -> LookedUp | NotFound -> Matched |
//! Mismatched -> Issued | Rejected`. Every rejection after validation is the
//! same public error; the reason only goes to the security log.

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::auth::claims::Claims;
use crate::auth::jwt::TokenSigner;
use crate::auth::password::PasswordHasher;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::logging::pii::Redacted;
use crate::logging::security::{self, LoginFailure};
use crate::repos::{NewUser, User, UserStore};
use crate::validation::{validate_login, validate_signup};

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("display_name", &self.display_name)
            .field("email", &Redacted(&self.email))
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &Redacted(&self.email))
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Collaborators are passed in once at startup; the service itself holds no
/// mutable state and is shared across workers behind an `Arc`.
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    signer: TokenSigner,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher, signer: TokenSigner) -> Self {
        Self {
            store,
            hasher,
            signer,
        }
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    pub async fn register(&self, req: SignupRequest) -> Result<User, AppError> {
        let fields = validate_signup(&req.display_name, &req.email, &req.password);
        if !fields.is_empty() {
            return Err(AppError::invalid(fields));
        }

        match self.store.find_by_email(&req.email).await {
            Ok(Some(_)) => {
                security::signup_conflict(&req.email);
                return Err(AppError::user_exists());
            }
            Ok(None) => {}
            Err(e) => return Err(create_failure(e, &req.email)),
        }

        let email = req.email.clone();
        let password_hash = self.hash_blocking(req.password).await?;
        let new_user = NewUser::new(req.display_name.trim(), req.email, password_hash);

        match self.store.create(new_user).await {
            Ok(user) => {
                info!(user_id = user.id, email = %Redacted(&user.email), "User registered");
                Ok(user)
            }
            Err(DomainError::Conflict(ConflictKind::UniqueEmail, _)) => Err(AppError::user_exists()),
            Err(DomainError::Validation(fields)) => Err(AppError::invalid(fields)),
            Err(e) => Err(create_failure(e, &email)),
        }
    }

    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let fields = validate_login(&req.email, &req.password);
        if !fields.is_empty() {
            return Err(AppError::invalid(fields));
        }

        let user = match self.store.find_by_email(&req.email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                security::login_failed(LoginFailure::UnknownEmail, &req.email);
                return Err(AppError::invalid_credentials());
            }
            Err(e) => {
                error!(error = %e, "User lookup failed during login");
                security::login_failed(LoginFailure::LookupFailed, &req.email);
                return Err(AppError::invalid_credentials());
            }
        };

        if !self.verify_blocking(req.password, user.password_hash).await? {
            security::login_failed(LoginFailure::PasswordMismatch, &req.email);
            return Err(AppError::invalid_credentials());
        }

        let access_token = self
            .signer
            .issue(&user.display_name, &user.email, SystemTime::now())?;
        security::login_succeeded(&user.email);

        Ok(LoginResponse { access_token })
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        self.signer.verify(token).map_err(|rejection| {
            security::token_rejected(rejection.as_str());
            AppError::invalid_token()
        })
    }

    async fn hash_blocking(&self, password: String) -> Result<String, AppError> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }

    async fn verify_blocking(&self, password: String, hash: String) -> Result<bool, AppError> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
    }
}

fn create_failure(e: DomainError, email: &str) -> AppError {
    error!(error = %e, email = %Redacted(email), "User creation failed");
    AppError::user_create_failed()
}
