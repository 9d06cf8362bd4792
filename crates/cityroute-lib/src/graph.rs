use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Dense index of a node inside a built [`Graph`].
///
/// Identifiers are assigned in lexicographic name order, so comparing two ids
/// orders their names the same way.
pub type NodeId = usize;

/// Raw city graph as it appears in the reference dataset.
///
/// Weights are kept as untyped JSON values; validation happens in
/// [`build_graph`], which drops anything that is not a non-negative finite
/// number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceGraph {
    nodes: BTreeMap<String, BTreeMap<String, Value>>,
}

impl SourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `name` exists, with an empty adjacency if it is new.
    pub fn insert_node(&mut self, name: impl Into<String>) {
        self.nodes.entry(name.into()).or_default();
    }

    /// Insert a directed adjacency entry `from -> to`.
    pub fn insert_edge(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        weight: impl Into<Value>,
    ) {
        self.nodes
            .entry(from.into())
            .or_default()
            .insert(to.into(), weight.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, Value>)> {
        self.nodes.iter()
    }
}

/// Convert a raw dataset weight into a usable edge distance.
///
/// Accepts JSON numbers and numeric strings; rejects negative, NaN and
/// infinite values along with every other JSON type.
pub fn parse_weight(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Edge within the routing graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub distance: f64,
}

/// Immutable routing graph used by the pathfinders.
///
/// Cloning is cheap; all clones share the same adjacency.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    inner: Arc<GraphInner>,
}

#[derive(Debug, Default)]
struct GraphInner {
    names: Vec<String>,
    index: HashMap<String, NodeId>,
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    pub fn len(&self) -> usize {
        self.inner.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.names.is_empty()
    }

    /// All node identifiers in name order.
    pub fn node_ids(&self) -> Range<NodeId> {
        0..self.len()
    }

    /// Lookup a node identifier by its case-sensitive name.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.inner.index.get(name).copied()
    }

    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.inner.names.get(id).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.index.contains_key(name)
    }

    /// Node names in iteration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.names.iter().map(String::as_str)
    }

    /// Return the neighbours for a given node, ordered by neighbour name.
    pub fn neighbours(&self, node: NodeId) -> &[Edge] {
        self.inner
            .adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.neighbours(from)
            .iter()
            .find(|edge| edge.target == to)
            .map(|edge| edge.distance)
    }

    /// Number of directed adjacency entries.
    pub fn edge_count(&self) -> usize {
        self.inner.adjacency.iter().map(Vec::len).sum()
    }

    /// Sum of edge weights along `path`, or `None` if a hop has no edge.
    pub fn path_distance(&self, path: &[NodeId]) -> Option<f64> {
        path.windows(2)
            .map(|pair| self.edge_weight(pair[0], pair[1]))
            .sum()
    }

    /// Resolve a user-supplied name to a node.
    ///
    /// Surrounding whitespace is ignored. An exact match wins; otherwise the
    /// first node in iteration order whose name matches case-insensitively is
    /// returned.
    pub fn resolve(&self, name: &str) -> Option<NodeId> {
        let name = name.trim();
        if let Some(id) = self.node_id(name) {
            return Some(id);
        }
        let lowered = name.to_lowercase();
        self.inner
            .names
            .iter()
            .position(|candidate| candidate.to_lowercase() == lowered)
    }
}

/// Build the usable routing graph from the raw source graph.
///
/// When `allowed` is empty every source node is eligible; otherwise only the
/// named nodes contribute adjacency. Neighbours of eligible nodes are kept
/// even when not eligible themselves, and every referenced neighbour is
/// guaranteed to exist as a node (possibly with no outgoing edges). Nodes
/// left with no valid edges are omitted unless something points at them.
pub fn build_graph(source: &SourceGraph, allowed: &[String]) -> Graph {
    let allowed: BTreeSet<&str> = allowed.iter().map(String::as_str).collect();
    let eligible = |name: &str| allowed.is_empty() || allowed.contains(name);

    let mut kept: BTreeMap<&str, Vec<(&str, f64)>> = BTreeMap::new();
    let mut dangling = 0usize;
    let mut malformed = 0usize;

    for (name, neighbours) in source.iter() {
        if !eligible(name.as_str()) {
            continue;
        }
        let mut edges = Vec::with_capacity(neighbours.len());
        for (neighbour, raw) in neighbours {
            if !source.contains(neighbour) {
                dangling += 1;
                continue;
            }
            match parse_weight(raw) {
                Some(weight) => edges.push((neighbour.as_str(), weight)),
                None => malformed += 1,
            }
        }
        if !edges.is_empty() {
            kept.insert(name.as_str(), edges);
        }
    }

    let referenced: Vec<&str> = kept
        .values()
        .flat_map(|edges| edges.iter().map(|(neighbour, _)| *neighbour))
        .collect();
    for neighbour in referenced {
        kept.entry(neighbour).or_default();
    }

    let names: Vec<String> = kept.keys().map(|name| name.to_string()).collect();
    let index: HashMap<String, NodeId> = names
        .iter()
        .enumerate()
        .map(|(id, name)| (name.clone(), id))
        .collect();
    let adjacency: Vec<Vec<Edge>> = kept
        .values()
        .map(|edges| {
            edges
                .iter()
                .map(|(neighbour, distance)| Edge {
                    target: index[*neighbour],
                    distance: *distance,
                })
                .collect()
        })
        .collect();

    debug!(
        nodes = names.len(),
        edges = adjacency.iter().map(Vec::len).sum::<usize>(),
        dangling,
        malformed,
        restricted = !allowed.is_empty(),
        "built routing graph"
    );

    Graph {
        inner: Arc::new(GraphInner {
            names,
            index,
            adjacency,
        }),
    }
}
