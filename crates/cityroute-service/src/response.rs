//! Body of `POST /find-route` responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use cityroute_lib::{Coordinate, RouteOutcome, RouteResult};

/// One route in a successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub path: Vec<String>,
    /// `[lat, lng]` per path entry, `null` where unknown.
    pub coordinates: Vec<Option<Coordinate>>,
    /// Kilometres, two decimals.
    pub distance: f64,
    /// Travel time label such as `"1.2 hours"`.
    pub time: String,
}

impl From<&RouteResult> for RouteEntry {
    fn from(result: &RouteResult) -> Self {
        Self {
            path: result.path.clone(),
            coordinates: result.coordinates.clone(),
            distance: result.distance_km,
            time: result.time_label(),
        }
    }
}

/// Route lookup response.
///
/// Both shapes are returned with status 200: a failed lookup is an answer,
/// not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FindRouteResponse {
    Found {
        from_city_name: String,
        to_city_name: String,
        routes: Vec<RouteEntry>,
    },
    Empty {
        routes: Vec<RouteEntry>,
        message: String,
    },
}

impl FindRouteResponse {
    pub fn empty(message: impl Into<String>) -> Self {
        Self::Empty {
            routes: Vec::new(),
            message: message.into(),
        }
    }
}

impl From<&RouteOutcome> for FindRouteResponse {
    fn from(outcome: &RouteOutcome) -> Self {
        match outcome {
            RouteOutcome::Found(result) => Self::Found {
                from_city_name: result.from.clone(),
                to_city_name: result.to.clone(),
                routes: vec![RouteEntry::from(result)],
            },
            other => Self::empty(other.message().unwrap_or_default()),
        }
    }
}

impl IntoResponse for FindRouteResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
