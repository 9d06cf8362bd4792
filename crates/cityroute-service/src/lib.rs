//! HTTP service exposing the cityroute planner.
//!
//! - [`AppState`]: the loaded dataset and routing graph shared by handlers
//! - [`app`]: the axum router with every endpoint mounted
//! - [`ProblemDetails`]: RFC 9457 responses for bad input and internal errors
//! - [`metrics`] and [`logging`]: Prometheus and structured JSON logging
//! - [`QueuedActivitySink`]: non-blocking activity history delivery
//!
//! ```text
//! POST /find-route            {"from": "...", "to": "..."}
//! GET  /get-locations
//! GET  /get-city-coordinates
//! GET  /health/live, /health/ready
//! GET  /metrics
//! ```

#![deny(warnings)]

mod handlers;
mod health;
mod history;
pub mod logging;
pub mod metrics;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use handlers::{find_route, get_city_coordinates, get_locations};
pub use health::{health_live, health_ready, HealthStatus};
pub use history::QueuedActivitySink;
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_route_failed, record_route_found, MetricsConfig,
    MetricsError,
};
pub use problem::{from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST};
pub use request::{
    extract_or_generate_request_id, extract_user_id, FindRouteRequest, RequestId, Validate,
    REQUEST_ID_HEADER, USER_ID_HEADER,
};
pub use response::{FindRouteResponse, RouteEntry};
pub use state::{AppState, AppStateError};

/// Build the service router over `state`.
///
/// The metrics endpoint is mounted at `metrics_path`.
pub fn app_with_metrics_path(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route("/find-route", post(find_route))
        .route("/get-locations", get(get_locations))
        .route("/get-city-coordinates", get(get_city_coordinates))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .route(metrics_path, get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Build the service router with metrics at `/metrics`.
pub fn app(state: AppState) -> Router {
    app_with_metrics_path(state, &MetricsConfig::default().path)
}
