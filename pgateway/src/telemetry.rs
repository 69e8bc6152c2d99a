//! Log subscriber and metrics exporter setup.

use std::net::SocketAddr;

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use parley::GatewayConfig;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over the configured level; an invalid level falls back to `info`.
pub fn init_tracing(config: &GatewayConfig) {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match config.log_level.parse::<EnvFilter>() {
            Ok(filter) => filter,
            Err(err) => {
                eprintln!(
                    "WARN: PARLEY_LOG='{}' is not a valid tracing filter ({err}); falling back to 'info'",
                    config.log_level
                );
                EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);

    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Serves Prometheus metrics on `PARLEY_METRICS_BIND` when set.
pub fn init_metrics(config: &GatewayConfig) -> anyhow::Result<Option<SocketAddr>> {
    let Some(bind) = &config.metrics_bind else {
        return Ok(None);
    };

    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid PARLEY_METRICS_BIND '{bind}'"))?;
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("failed to install prometheus exporter")?;

    Ok(Some(addr))
}
