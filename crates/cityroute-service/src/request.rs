//! Request types, validation and header extraction.

use http::HeaderMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cityroute_lib::{RouteAlgorithm, RouteRequest};

use crate::ProblemDetails;

/// Header carrying a caller-supplied correlation ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Header identifying the caller for activity history.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Validation trait for request types.
pub trait Validate {
    /// Validate the request, returning a boxed 400 problem if invalid.
    ///
    /// The `request_id` populates the problem's `instance` field.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Body of `POST /find-route`.
///
/// Both endpoints are optional at the type level so a missing field becomes a
/// 400 problem instead of an extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindRouteRequest {
    /// Starting city name.
    #[serde(default, alias = "from_city", alias = "frm")]
    pub from: Option<String>,

    /// Destination city name.
    #[serde(default, alias = "to_city", alias = "to_city_name")]
    pub to: Option<String>,

    /// Search algorithm, `a-star` unless given.
    #[serde(default)]
    pub algorithm: RouteAlgorithm,

    /// Restrict the search to these cities.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_cities: Vec<String>,
}

impl FindRouteRequest {
    /// Convert into a library request, attributing it to `requested_by`.
    ///
    /// Call after [`Validate::validate`]; missing endpoints become empty names.
    pub fn into_route_request(self, requested_by: Option<String>) -> RouteRequest {
        RouteRequest {
            from: self.from.unwrap_or_default(),
            to: self.to.unwrap_or_default(),
            algorithm: self.algorithm,
            allowed_cities: self.allowed_cities,
            requested_by,
        }
    }
}

impl Validate for FindRouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());

        if !present(&self.from) || !present(&self.to) {
            return Err(Box::new(ProblemDetails::bad_request(
                "Please provide both 'from' and 'to' cities",
                request_id,
            )));
        }

        Ok(())
    }
}

/// Newtype wrapper for request correlation IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a new UUID v7 request ID.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Take `X-Request-ID` from the headers or generate a UUID v7.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    header_text(headers, REQUEST_ID_HEADER)
        .map(RequestId)
        .unwrap_or_else(RequestId::generate)
}

/// Identity from `X-User-Id`, if the caller sent a non-blank one.
pub fn extract_user_id(headers: &HeaderMap) -> Option<String> {
    header_text(headers, USER_ID_HEADER)
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_request_accepts_city_aliases() {
        let request: FindRouteRequest =
            serde_json::from_str(r#"{"from_city": "Ballari", "to_city": "Hospet"}"#).unwrap();
        assert_eq!(request.from.as_deref(), Some("Ballari"));
        assert_eq!(request.to.as_deref(), Some("Hospet"));
        assert_eq!(request.algorithm, RouteAlgorithm::AStar);

        let short: FindRouteRequest =
            serde_json::from_str(r#"{"frm": "Kampli", "to_city_name": "Hampi"}"#).unwrap();
        assert_eq!(short.from.as_deref(), Some("Kampli"));
        assert_eq!(short.to.as_deref(), Some("Hampi"));
    }

    #[test]
    fn test_request_parses_algorithm() {
        let request: FindRouteRequest = serde_json::from_str(
            r#"{"from": "Ballari", "to": "Hospet", "algorithm": "dijkstra"}"#,
        )
        .unwrap();
        assert_eq!(request.algorithm, RouteAlgorithm::Dijkstra);
    }

    #[test]
    fn test_validate_requires_both_cities() {
        let missing_to = FindRouteRequest {
            from: Some("Ballari".into()),
            ..Default::default()
        };
        let problem = missing_to.validate("req-1").unwrap_err();
        assert_eq!(problem.status, 400);
        assert_eq!(problem.instance.as_deref(), Some("req-1"));

        let blank_from = FindRouteRequest {
            from: Some("   ".into()),
            to: Some("Hospet".into()),
            ..Default::default()
        };
        assert!(blank_from.validate("req-2").is_err());
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        let request = FindRouteRequest {
            from: Some("Ballari".into()),
            to: Some("Hospet".into()),
            ..Default::default()
        };
        assert!(request.validate("req-3").is_ok());
    }

    #[test]
    fn test_into_route_request_carries_identity() {
        let request = FindRouteRequest {
            from: Some("Ballari".into()),
            to: Some("Gadag".into()),
            algorithm: RouteAlgorithm::Dijkstra,
            allowed_cities: vec!["Ballari".into()],
        };
        let lib = request.into_route_request(Some("ada".into()));
        assert_eq!(lib.from, "Ballari");
        assert_eq!(lib.to, "Gadag");
        assert_eq!(lib.algorithm, RouteAlgorithm::Dijkstra);
        assert_eq!(lib.allowed_cities, vec!["Ballari".to_string()]);
        assert_eq!(lib.requested_by.as_deref(), Some("ada"));
    }

    #[test]
    fn test_request_id_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("req-abc"));
        assert_eq!(extract_or_generate_request_id(&headers).as_str(), "req-abc");
    }

    #[test]
    fn test_request_id_generated_when_absent() {
        let headers = HeaderMap::new();
        let first = extract_or_generate_request_id(&headers);
        let second = extract_or_generate_request_id(&headers);
        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.as_str()).is_ok());
    }

    #[test]
    fn test_user_id_ignores_blank_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_user_id(&headers), None);
        headers.insert("x-user-id", HeaderValue::from_static("  "));
        assert_eq!(extract_user_id(&headers), None);
        headers.insert("x-user-id", HeaderValue::from_static("ada"));
        assert_eq!(extract_user_id(&headers).as_deref(), Some("ada"));
    }
}
