//! Frontend-side session layer for the auth backend.
//!
//! Proxies credentials to the backend, keeps the returned access token in a
//! signed HTTP-only cookie and re-checks it with the backend on every read.

pub mod bridge;
pub mod client;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;

pub use bridge::{Materialized, Session, SessionBridge, SessionUser};
pub use client::{BackendClient, BackendUser, Forwarded, HttpBackendClient, SignupForm};
pub use config::BridgeConfig;
pub use error::BridgeError;
pub use routes::{configure, BridgeState};
pub use session::{SessionCodec, SessionEnvelope, SessionError, SESSION_COOKIE};

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
