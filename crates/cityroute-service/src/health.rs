//! `/health/live` and `/health/ready` probe handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use cityroute_lib::RouteService;

use crate::AppState;

const SERVICE: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Probe response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `ok`, or `not_ready: <reason>`.
    pub status: String,
    pub service: String,
    pub version: String,
    /// Routable graph nodes (readiness only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes_loaded: Option<usize>,
    /// Cities with a known coordinate (readiness only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates_loaded: Option<usize>,
}

impl HealthStatus {
    fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            service: SERVICE.to_string(),
            version: VERSION.to_string(),
            nodes_loaded: None,
            coordinates_loaded: None,
        }
    }

    /// Readiness of `routes`: ready once the graph has at least one node.
    pub fn for_service(routes: &RouteService) -> (StatusCode, Self) {
        let nodes = routes.graph().len();
        if nodes == 0 {
            let status = Self {
                status: "not_ready: no cities loaded".to_string(),
                ..Self::ok()
            };
            return (StatusCode::SERVICE_UNAVAILABLE, status);
        }

        let status = Self {
            nodes_loaded: Some(nodes),
            coordinates_loaded: Some(routes.coordinates().len()),
            ..Self::ok()
        };
        (StatusCode::OK, status)
    }
}

/// Liveness: 200 while the process is serving.
pub async fn health_live() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

/// Readiness with dataset counts.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"cityroute-service","version":"0.1.0","nodes_loaded":37,"coordinates_loaded":19}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let (code, status) = HealthStatus::for_service(state.service());
    (code, Json(status))
}
