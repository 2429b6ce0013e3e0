use actix_web::{web, App, HttpServer};
use backend::config::db::database_url;
use backend::config::parse_var_or;
use backend::infra::state::build_state;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

fn fail(message: impl std::fmt::Display) -> ! {
    error!("{message}");
    eprintln!("❌ {message}");
    std::process::exit(1);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = parse_var_or("BACKEND_PORT", 3001).unwrap_or_else(|e| fail(e));

    let security_config = SecurityConfig::from_env().unwrap_or_else(|e| fail(e));
    let db_url = database_url().unwrap_or_else(|e| fail(e));

    let app_state = build_state()
        .with_security(security_config)
        .with_db(db_url)
        .build()
        .await
        .unwrap_or_else(|e| fail(format!("Failed to build application state: {e}")));

    info!(
        store = app_state.store_backend(),
        token_ttl_secs = app_state.security.token_ttl.as_secs(),
        bcrypt_cost = app_state.security.bcrypt_cost,
        "Auth backend starting on http://{host}:{port}"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
