//! Route and lookup handlers.
//!
//! Handlers stay thin: parse and validate, call [`cityroute_lib::RouteService`],
//! shape the response.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

use cityroute_lib::RouteOutcome;

use crate::metrics::{record_route_failed, record_route_found};
use crate::request::{extract_or_generate_request_id, extract_user_id, FindRouteRequest, Validate};
use crate::{from_lib_error, AppState, FindRouteResponse, ProblemDetails};

/// `POST /find-route`.
pub async fn find_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<FindRouteRequest>, JsonRejection>,
) -> Response {
    let request_id = extract_or_generate_request_id(&headers);

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            record_route_failed("invalid_request");
            return ProblemDetails::bad_request(rejection.body_text(), request_id.as_str())
                .into_response();
        }
    };

    if let Err(problem) = request.validate(request_id.as_str()) {
        record_route_failed("invalid_request");
        return problem.into_response();
    }

    let route_request = request.into_route_request(extract_user_id(&headers));
    info!(
        request_id = %request_id,
        from = %route_request.from,
        to = %route_request.to,
        algorithm = %route_request.algorithm,
        "handling route request"
    );

    let routes = state.clone();
    let computed =
        tokio::task::spawn_blocking(move || routes.service().find_route(&route_request)).await;

    let outcome = match computed {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => {
            error!(request_id = %request_id, error = %e, "route computation failed");
            record_route_failed("internal_error");
            return from_lib_error(&e, request_id.as_str()).into_response();
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "route computation panicked");
            record_route_failed("internal_error");
            return ProblemDetails::internal_error("Route computation failed", request_id.as_str())
                .into_response();
        }
    };

    match &outcome {
        RouteOutcome::Found(result) => {
            record_route_found(&result.algorithm.to_string(), result.distance_km);
        }
        RouteOutcome::CityNotFound { .. } => record_route_failed("unknown_city"),
        RouteOutcome::NoRoute { .. } => record_route_failed("no_route"),
    }

    FindRouteResponse::from(&outcome).into_response()
}

/// `GET /get-locations`: sorted names of every known place.
pub async fn get_locations(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.service().locations())
}

/// `GET /get-city-coordinates`: name to `[lat, lng]`.
pub async fn get_city_coordinates(State(state): State<AppState>) -> Response {
    Json(state.service().coordinates()).into_response()
}
