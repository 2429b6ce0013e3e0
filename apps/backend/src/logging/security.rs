//! Security-relevant audit events.
//!
//! The HTTP layer answers auth failures with deliberately generic messages;
//! the real reason is only recorded here.

use tracing::{info, warn};

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Why a login was refused. Never sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    UnknownEmail,
    PasswordMismatch,
    LookupFailed,
}

impl LoginFailure {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownEmail => "unknown_email",
            Self::PasswordMismatch => "password_mismatch",
            Self::LookupFailed => "lookup_failed",
        }
    }
}

pub fn login_failed(reason: LoginFailure, email: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %Redacted(email),
        reason = reason.as_str(),
        "Authentication failure"
    );
}

pub fn login_succeeded(email: &str) {
    let trace_id = trace_ctx::trace_id();

    info!(
        event = "SECURITY_LOGIN_SUCCEEDED",
        %trace_id,
        email = %Redacted(email),
        "Access token issued"
    );
}

pub fn token_rejected(reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        reason,
        "Bearer token rejected"
    );
}

pub fn signup_conflict(email: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_SIGNUP_CONFLICT",
        %trace_id,
        email = %Redacted(email),
        "Signup for an existing email"
    );
}
