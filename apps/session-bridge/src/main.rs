use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use session_bridge::{
    configure, BridgeConfig, BridgeState, HttpBackendClient, SessionBridge, SessionCodec,
};
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

    let config = BridgeConfig::from_env().unwrap_or_else(|e| fail(e));
    let client = HttpBackendClient::new(config.backend_url.clone()).unwrap_or_else(|e| fail(e));

    info!(
        backend_url = %config.backend_url,
        session_max_age_secs = config.session_max_age.as_secs(),
        cookie_secure = config.cookie_secure,
        "Session bridge starting on http://{}:{}",
        config.host,
        config.port
    );

    let state = web::Data::new(BridgeState {
        bridge: SessionBridge::new(Arc::new(client), config.session_max_age),
        codec: SessionCodec::new(&config.session_secret, config.session_max_age),
        cookie_secure: config.cookie_secure,
    });

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Dms"))
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
