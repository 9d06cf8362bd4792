//! Prometheus metrics for the route service.
//!
//! - [`MetricsConfig`]: whether to install the recorder and where to serve it
//! - [`init_metrics`]: install the global Prometheus recorder
//! - [`metrics_handler`]: axum handler rendering the exposition text
//! - route business metrics recorded by the handlers
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use cityroute_service::metrics::{init_metrics, metrics_handler, MetricsConfig};
//!
//! init_metrics(&MetricsConfig::default()).expect("failed to initialize metrics");
//! let app: Router = Router::new().route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Counter of successful lookups, labelled by algorithm.
pub const ROUTES_FOUND: &str = "cityroute_routes_found_total";

/// Counter of lookups without a route, labelled by reason.
pub const ROUTES_FAILED: &str = "cityroute_routes_failed_total";

/// Histogram of returned route distances.
pub const ROUTE_DISTANCE: &str = "cityroute_route_distance_km";

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Path for the metrics endpoint.
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Read `METRICS_ENABLED` (anything but "false" enables) and
    /// `METRICS_PATH`.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("METRICS_ENABLED").ok().as_deref(),
            std::env::var("METRICS_PATH").ok(),
        )
    }

    fn from_values(enabled: Option<&str>, path: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            enabled: enabled.map_or(defaults.enabled, |v| !v.eq_ignore_ascii_case("false")),
            path: path.filter(|p| p.starts_with('/')).unwrap_or(defaults.path),
        }
    }
}

/// Install the Prometheus recorder.
///
/// Must be called once, before any metric is recorded.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// Axum handler for the metrics endpoint.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(PrometheusHandle::render)
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

/// Record a route returned to the caller.
pub fn record_route_found(algorithm: &str, distance_km: f64) {
    metrics::counter!(ROUTES_FOUND, "algorithm" => algorithm.to_string()).increment(1);
    metrics::histogram!(ROUTE_DISTANCE).record(distance_km);
}

/// Record a lookup that produced no route.
///
/// `reason` is one of `invalid_request`, `unknown_city`, `no_route` or
/// `internal_error`.
pub fn record_route_failed(reason: &str) {
    metrics::counter!(ROUTES_FAILED, "reason" => reason.to_string()).increment(1);
}
