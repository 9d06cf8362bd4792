//! Common test utilities and fixture helpers.
//!
//! Integration tests share the embedded reference dataset plus a few small
//! hand-built graphs.

use std::sync::Arc;

use cityroute_lib::{
    build_graph, Graph, MemoryActivitySink, NodeId, ReferenceData, RouteService,
    RouteServiceConfig, SourceGraph,
};

/// The dataset shipped with the library.
#[allow(dead_code)]
pub fn sample_data() -> ReferenceData {
    ReferenceData::embedded().expect("embedded dataset parses")
}

/// A route service over the sample data with default configuration.
#[allow(dead_code)]
pub fn sample_service() -> RouteService {
    RouteService::new(sample_data(), RouteServiceConfig::default())
}

/// A route service over the sample data that records activity in memory.
#[allow(dead_code)]
pub fn recording_service() -> (RouteService, Arc<MemoryActivitySink>) {
    let sink = Arc::new(MemoryActivitySink::new());
    let service = sample_service().with_activity_sink(sink.clone());
    (service, sink)
}

/// Build a graph from `(from, to, weight)` triples, adding both directions.
#[allow(dead_code)]
pub fn undirected_graph(edges: &[(&str, &str, f64)]) -> Graph {
    let mut source = SourceGraph::new();
    for (a, b, weight) in edges {
        source.insert_edge(*a, *b, *weight);
        source.insert_edge(*b, *a, *weight);
    }
    build_graph(&source, &[])
}

/// Resolve names in `graph`, panicking on unknown names.
#[allow(dead_code)]
pub fn ids(graph: &Graph, names: &[&str]) -> Vec<NodeId> {
    names
        .iter()
        .map(|name| graph.node_id(name).unwrap_or_else(|| panic!("node {name}")))
        .collect()
}

/// Convert a path of ids back into names.
#[allow(dead_code)]
pub fn names(graph: &Graph, path: &[NodeId]) -> Vec<String> {
    path.iter()
        .map(|&id| graph.node_name(id).expect("valid id").to_string())
        .collect()
}
