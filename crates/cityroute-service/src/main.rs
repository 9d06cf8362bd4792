//! cityroute HTTP service.
//!
//! # Configuration
//!
//! - `CITYROUTE_DATA_PATH` - dataset file or directory (embedded data when unset)
//! - `CITYROUTE_HISTORY_PATH` - JSON-lines activity history (logged when unset)
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `RUST_LOG`, `LOG_FORMAT`, `SERVICE_NAME` - see [`LoggingConfig`]
//! - `METRICS_ENABLED`, `METRICS_PATH` - see [`MetricsConfig`]

use std::env;
use std::net::SocketAddr;

use tracing::{error, info, warn};

use cityroute_service::{
    app_with_metrics_path, init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig,
};

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_default_service("cityroute");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if metrics_config.enabled {
        if let Err(e) = init_metrics(&metrics_config) {
            warn!(error = %e, "failed to initialize metrics, continuing without metrics");
        }
    }

    let port = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let state = AppState::load(None).map_err(|e| {
        error!(error = %e, "failed to load application state");
        e
    })?;

    let app = app_with_metrics_path(state, &metrics_config.path);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
