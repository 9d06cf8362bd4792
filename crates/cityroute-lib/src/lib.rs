//! cityroute library entry points.
//!
//! This crate loads the city reference dataset, builds the routing graph,
//! and answers shortest-path queries through [`RouteService`]. Higher-level
//! consumers (CLI, HTTP service) should only depend on the items exported
//! here instead of reimplementing behavior.

#![deny(warnings)]

pub mod activity;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod graph;
pub mod output;
pub mod path;
pub mod routing;

#[cfg(test)]
mod test_helpers;

pub use activity::{
    sink_from_env, ActivityRecord, ActivitySink, JsonLinesActivitySink, MemoryActivitySink,
    TracingActivitySink,
};
pub use dataset::{default_dataset_path, load_reference_data, ReferenceData};
pub use error::{Error, Result};
pub use geo::{
    admissible_scale, Coordinate, CoordinateTable, GreatCircle, Heuristic, MissingCoordinates,
    ZeroHeuristic,
};
pub use graph::{build_graph, Graph, NodeId, SourceGraph};
pub use output::{RouteRenderMode, RouteSummary};
pub use path::{find_route_a_star, find_route_dijkstra, SearchLimits, SearchOutcome};
pub use routing::{
    RouteAlgorithm, RouteOutcome, RouteRequest, RouteResult, RouteService, RouteServiceConfig,
    UnresolvedCity,
};
