use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Public message for any failed sign-in, matching the backend's wording.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const NOT_AUTHENTICATED_MESSAGE: &str = "Not authenticated";

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Backend unreachable: {0}")]
    BackendUnavailable(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Body shape of every bridge error, as the login form reads it.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ResponseError for BridgeError {
    fn status_code(&self) -> StatusCode {
        match self {
            BridgeError::InvalidCredentials | BridgeError::NotAuthenticated => {
                StatusCode::UNAUTHORIZED
            }
            BridgeError::BackendUnavailable(_) => StatusCode::BAD_GATEWAY,
            BridgeError::Config(_) | BridgeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            // Do not leak backend addresses or internals to the browser.
            BridgeError::BackendUnavailable(_) => "Authentication service unavailable".to_string(),
            BridgeError::Config(_) | BridgeError::Internal(_) => "Internal error".to_string(),
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody { error })
    }
}
