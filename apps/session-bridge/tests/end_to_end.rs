//! The bridge in front of a real backend listening on an ephemeral port.

mod support;

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{test, web, App, HttpServer};
use backend::infra::state::build_state;
use backend::routes;
use backend::state::security_config::SecurityConfig;
use serde_json::{json, Value};
use session_bridge::HttpBackendClient;
use support::{bridge_app, is_removal, session_cookie};

const BACKEND_SECRET: &[u8] = b"end_to_end_backend_secret";

/// Start the backend with SQLite in memory and short-lived tokens.
async fn spawn_backend(token_ttl: Duration) -> (String, ServerHandle) {
    let state = build_state()
        .with_security(
            SecurityConfig::new(BACKEND_SECRET)
                .with_bcrypt_cost(4)
                .with_token_ttl(token_ttl),
        )
        .with_db("sqlite::memory:")
        .build()
        .await
        .expect("backend state");
    let data = web::Data::new(state);

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .workers(1)
    .listen(listener)
    .expect("listen")
    .run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    (format!("http://{addr}"), handle)
}

#[actix_web::test]
async fn signup_sign_in_and_session_expiry_through_the_bridge() {
    let (backend_url, handle) = spawn_backend(Duration::from_secs(2)).await;
    let client = HttpBackendClient::new(backend_url).expect("client");
    let app = bridge_app(Arc::new(client)).await;

    let signup = json!({
        "displayName": "Jane Doe",
        "email": "jane@x.com",
        "password": "Abc12345!",
    });

    let req = test::TestRequest::post()
        .uri("/api/proxy/auth/signup")
        .set_json(&signup)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User created successfully");

    // The backend's conflict comes back as-is.
    let req = test::TestRequest::post()
        .uri("/api/proxy/auth/signup")
        .set_json(&signup)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "USER_ALREADY_EXISTS");

    let req = test::TestRequest::post()
        .uri("/api/auth/callback/credentials")
        .set_json(json!({ "email": "jane@x.com", "password": "wrong-Pass1!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/auth/callback/credentials")
        .set_json(json!({ "email": "jane@x.com", "password": "Abc12345!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp).expect("session cookie");

    let req = test::TestRequest::get()
        .uri("/api/auth/session")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["name"], "Jane Doe");
    assert_eq!(body["user"]["email"], "jane@x.com");
    assert!(body["accessToken"].as_str().is_some_and(|t| !t.is_empty()));

    // The bridge cookie outlives the backend token; the next read notices.
    actix_web::rt::time::sleep(Duration::from_millis(3100)).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/session")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(is_removal(&session_cookie(&resp).expect("removal cookie")));

    handle.stop(true).await;
}

#[actix_web::test]
async fn unreachable_backend_reads_as_bad_credentials() {
    // Bind then drop to get a port nobody listens on.
    let port = TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .map(|a| a.port())
        .expect("ephemeral port");
    let client = HttpBackendClient::new(format!("http://127.0.0.1:{port}")).expect("client");
    let app = bridge_app(Arc::new(client)).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/callback/credentials")
        .set_json(json!({ "email": "jane@x.com", "password": "Abc12345!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/proxy/auth/signup")
        .set_json(json!({ "displayName": "Jane Doe", "email": "jane@x.com", "password": "Abc12345!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}
