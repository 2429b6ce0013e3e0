#![allow(dead_code)]

// tests/common/mod.rs
use serde_json::{json, Value};

// Logging is auto-installed for every test binary that declares `mod common;`
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub const STRONG_PASSWORD: &str = "Abc12345!";

pub fn signup_body(display_name: &str, email: &str, password: &str) -> Value {
    json!({
        "displayName": display_name,
        "email": email,
        "password": password,
    })
}

pub fn login_body(email: &str, password: &str) -> Value {
    json!({ "email": email, "password": password })
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
