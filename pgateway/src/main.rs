//! parley-gateway entry point.
//!
//! Startup order:
//! 1. Read configuration from `PARLEY_*` environment variables.
//! 2. Install the tracing subscriber and, when configured, the Prometheus exporter.
//! 3. Build one chat service per configured backend.
//! 4. Serve the router until Ctrl-C or SIGTERM.

mod error;
mod routes;
mod state;
mod telemetry;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use parley::{GatewayConfig, GatewayRuntime};
use tracing::{info, warn};

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::from_env();

    telemetry::init_tracing(&config);
    info!(version = env!("CARGO_PKG_VERSION"), "parley-gateway starting");

    if let Some(addr) = telemetry::init_metrics(&config)? {
        info!(%addr, "prometheus exporter listening");
    }

    let runtime = GatewayRuntime::from_config(&config).context("failed to build backends")?;
    let backends = runtime.backends();
    if backends.is_empty() {
        warn!("no backends configured; every /llm route will return 404");
    }
    for backend in &backends {
        info!(backend = %backend, "backend registered");
    }

    let app = routes::build(Arc::new(AppState::new(runtime)));
    let addr: SocketAddr = config
        .bind
        .parse()
        .with_context(|| format!("invalid PARLEY_BIND '{}'", config.bind))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("parley-gateway stopped");
    Ok(())
}

/// Resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => warn!(error = %err, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
