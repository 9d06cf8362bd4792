//! Fixtures for handler tests.
//!
//! Enable the `test-utils` feature to use these from other crates.

use std::sync::Arc;

use cityroute_lib::{MemoryActivitySink, ReferenceData, RouteService, RouteServiceConfig};

use crate::state::AppState;

/// Cities in the embedded dataset used by handler tests.
pub mod fixture_cities {
    pub const BALLARI: &str = "Ballari";
    pub const HOSPET: &str = "Hospet";
    pub const GADAG: &str = "Gadag";
    pub const CHITRADURGA: &str = "Chitradurga";
    pub const RAICHUR: &str = "Raichur";
}

fn embedded_service() -> RouteService {
    let data = ReferenceData::embedded()
        .unwrap_or_else(|e| panic!("embedded dataset failed to load: {e}"));
    RouteService::new(data, RouteServiceConfig::default())
}

/// State over the embedded dataset with the default tracing activity sink.
pub fn test_state() -> AppState {
    AppState::from_service(embedded_service())
}

/// State whose activity records are captured in memory.
///
/// Records are delivered synchronously, so they are visible as soon as the
/// request completes.
pub fn recording_state() -> (AppState, Arc<MemoryActivitySink>) {
    let sink = Arc::new(MemoryActivitySink::new());
    let service = embedded_service().with_activity_sink(sink.clone());
    (AppState::from_service(service), sink)
}
