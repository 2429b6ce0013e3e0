//! Security audit events land inside the request span with a redacted email.
//!
//! This binary installs its own global subscriber, so it does not declare
//! `mod common;`.

mod support;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};
use serial_test::serial;
use support::{create_test_app, memory_state};
use tracing::subscriber::set_global_default;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;

#[derive(Clone)]
struct BufWriter(Arc<Mutex<Vec<u8>>>);

impl Write for BufWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[actix_web::test]
#[serial]
async fn failed_login_is_audited_in_request_span() -> Result<(), Box<dyn std::error::Error>> {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let make_writer = {
        let buf = buf.clone();
        move || BufWriter(buf.clone())
    };
    let subscriber = Registry::default().with(
        fmt::Layer::default()
            .json()
            .with_span_list(true)
            .with_current_span(true)
            .with_ansi(false)
            .with_writer(make_writer),
    );
    set_global_default(subscriber).expect("set global subscriber");

    let app = create_test_app(memory_state().await?)
        .with_prod_routes()
        .build()
        .await?;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": "nobody@x.com", "password": "Abc12345!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let trace_id = resp
        .headers()
        .get("x-trace-id")
        .expect("x-trace-id header present")
        .to_str()?
        .to_string();

    let output = String::from_utf8(buf.lock().unwrap().clone())?;
    assert!(
        !output.contains("nobody@x.com"),
        "raw email leaked into logs"
    );

    let audit = output
        .lines()
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .find(|v| v["fields"]["event"] == "SECURITY_LOGIN_FAILED")
        .expect("login failure audit event");

    assert_eq!(audit["fields"]["reason"], "unknown_email");
    assert_eq!(audit["fields"]["email"], "n***@x.com");
    assert_eq!(audit["fields"]["trace_id"], trace_id.as_str());

    let in_request_span = audit["spans"]
        .as_array()
        .map(|spans| {
            spans
                .iter()
                .any(|s| s["name"] == "request" && s["trace_id"] == trace_id.as_str())
        })
        .unwrap_or(false);
    assert!(in_request_span, "audit event not inside the request span");

    Ok(())
}
