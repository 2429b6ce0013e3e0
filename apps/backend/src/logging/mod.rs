//! Logging helpers: PII redaction and security audit events.

pub mod pii;
pub mod security;
