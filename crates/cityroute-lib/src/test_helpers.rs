// Test-only helpers for `cityroute-lib` unit tests
#![allow(dead_code)]
use crate::graph::{build_graph, Graph, SourceGraph};

/// Builder for small routing graphs in tests.
///
/// Every endpoint mentioned is registered as a source node, so edges are
/// never dropped as dangling.
pub struct GraphFixture {
    source: SourceGraph,
}

impl GraphFixture {
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: SourceGraph::new(),
        }
    }

    /// Add a directed edge `from -> to`.
    pub fn edge(mut self, from: &str, to: &str, weight: f64) -> Self {
        self.source.insert_edge(from, to, weight);
        self.source.insert_node(to);
        self
    }

    /// Add edges in both directions with the same weight.
    pub fn undirected(self, a: &str, b: &str, weight: f64) -> Self {
        self.edge(a, b, weight).edge(b, a, weight)
    }

    pub fn source(&self) -> &SourceGraph {
        &self.source
    }

    pub fn build(self) -> Graph {
        build_graph(&self.source, &[])
    }
}

impl Default for GraphFixture {
    fn default() -> Self {
        Self::new()
    }
}
