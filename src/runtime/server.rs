//! Server mode
//!
//! Builds the shared `AppState` and runs the HTTP server until it stops or
//! Ctrl-C is received.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

use crate::api::configure_routes;
use crate::api::middleware::{RequestIdMiddleware, SessionGate};
use crate::config::StaticConfig;
use crate::runtime::startup;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: Arc<StaticConfig>) -> Result<()> {
    let state = startup::prepare(&config)
        .inspect_err(|e| error!("Server startup failed: {}", e))
        .context("Failed to prepare application state")?;
    let state = web::Data::new(state);

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(SessionGate)
            .wrap(RequestIdMiddleware) // 包在 SessionGate 外面，会话日志也带 request_id
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .app_data(state.clone())
            .app_data(web::FormConfig::default().limit(16 * 1024))
            .configure(configure_routes)
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_millis(5000))
    .client_disconnect_timeout(Duration::from_millis(1000))
    .workers(cpu_count)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?;

    warn!("Starting server at http://{}", bind_address);
    let server = server.run();
    let handle = server.handle();

    tokio::select! {
        res = server => {
            res.context("HTTP server terminated with an error")?;
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Received Ctrl-C, shutting down");
            handle.stop(true).await;
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
