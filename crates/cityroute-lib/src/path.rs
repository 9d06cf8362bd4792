use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::warn;

use crate::geo::Heuristic;
use crate::graph::{Graph, NodeId};

/// Default cap on node expansions per search.
pub const DEFAULT_MAX_EXPANSIONS: usize = 100_000;

/// Defensive bounds applied to a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of non-stale queue pops before giving up.
    pub max_expansions: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

/// Result of a single shortest-path search.
///
/// A missing path is a normal outcome: `distance` is `f64::INFINITY` and
/// `path` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub distance: f64,
    pub path: Option<Vec<NodeId>>,
    /// Number of nodes expanded (stale pops excluded).
    pub expanded: usize,
}

impl SearchOutcome {
    fn not_found(expanded: usize) -> Self {
        Self {
            distance: f64::INFINITY,
            path: None,
            expanded,
        }
    }

    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of hops in the path, if one was found.
    pub fn hop_count(&self) -> Option<usize> {
        self.path
            .as_ref()
            .map(|path| path.len().saturating_sub(1))
    }
}

/// Run A* search from `start` to `goal`.
///
/// The queue orders entries by `(f, g, sequence)`, where `sequence` grows
/// with every push, so among equally good candidates the one enqueued first
/// is expanded first and repeated searches always return the same path.
/// Entries superseded by a later improvement are skipped when popped.
pub fn find_route_a_star<H>(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    heuristic: &H,
    limits: &SearchLimits,
) -> SearchOutcome
where
    H: Heuristic + ?Sized,
{
    let node_count = graph.len();
    if start >= node_count || goal >= node_count {
        return SearchOutcome::not_found(0);
    }

    let mut g_score = vec![f64::INFINITY; node_count];
    let mut f_score = vec![f64::INFINITY; node_count];
    let mut parents: Vec<Option<NodeId>> = vec![None; node_count];
    let mut queue = BinaryHeap::new();
    let mut sequence = 0u64;
    let mut expanded = 0usize;

    g_score[start] = 0.0;
    f_score[start] = heuristic.estimate(graph, start, goal);
    queue.push(AStarEntry::new(start, 0.0, f_score[start], sequence));

    while let Some(entry) = queue.pop() {
        let node = entry.node;
        if entry.estimate.0 > f_score[node] || entry.cost.0 > g_score[node] {
            continue;
        }

        if node == goal {
            return match reconstruct_path(&parents, start, goal) {
                Some(path) => SearchOutcome {
                    distance: g_score[goal],
                    path: Some(path),
                    expanded,
                },
                None => SearchOutcome::not_found(expanded),
            };
        }

        if expanded >= limits.max_expansions {
            warn!(
                expanded,
                limit = limits.max_expansions,
                "a-star search hit the expansion cap"
            );
            return SearchOutcome::not_found(expanded);
        }
        expanded += 1;

        let current = g_score[node];
        for edge in graph.neighbours(node) {
            let next = edge.target;
            let tentative_g = current + edge.distance;
            if tentative_g < g_score[next] {
                parents[next] = Some(node);
                g_score[next] = tentative_g;
                f_score[next] = tentative_g + heuristic.estimate(graph, next, goal);
                sequence += 1;
                queue.push(AStarEntry::new(next, tentative_g, f_score[next], sequence));
            }
        }
    }

    SearchOutcome::not_found(expanded)
}

/// Run Dijkstra's algorithm from `start` to `goal`.
///
/// Ties on cost are broken by insertion order, as in [`find_route_a_star`].
pub fn find_route_dijkstra(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    limits: &SearchLimits,
) -> SearchOutcome {
    let node_count = graph.len();
    if start >= node_count || goal >= node_count {
        return SearchOutcome::not_found(0);
    }

    let mut distances = vec![f64::INFINITY; node_count];
    let mut parents: Vec<Option<NodeId>> = vec![None; node_count];
    let mut queue = BinaryHeap::new();
    let mut sequence = 0u64;
    let mut expanded = 0usize;

    distances[start] = 0.0;
    queue.push(QueueEntry::new(start, 0.0, sequence));

    while let Some(entry) = queue.pop() {
        let node = entry.node;
        if entry.cost.0 > distances[node] {
            continue;
        }

        if node == goal {
            return match reconstruct_path(&parents, start, goal) {
                Some(path) => SearchOutcome {
                    distance: distances[goal],
                    path: Some(path),
                    expanded,
                },
                None => SearchOutcome::not_found(expanded),
            };
        }

        if expanded >= limits.max_expansions {
            warn!(
                expanded,
                limit = limits.max_expansions,
                "dijkstra search hit the expansion cap"
            );
            return SearchOutcome::not_found(expanded);
        }
        expanded += 1;

        for edge in graph.neighbours(node) {
            let next = edge.target;
            let next_cost = distances[node] + edge.distance;
            if next_cost < distances[next] {
                distances[next] = next_cost;
                parents[next] = Some(node);
                sequence += 1;
                queue.push(QueueEntry::new(next, next_cost, sequence));
            }
        }
    }

    SearchOutcome::not_found(expanded)
}

/// Shortest distance from `start` to every node; unreachable nodes are
/// `f64::INFINITY`.
pub fn shortest_distances(graph: &Graph, start: NodeId) -> Vec<f64> {
    let mut distances = vec![f64::INFINITY; graph.len()];
    if start >= distances.len() {
        return distances;
    }

    let mut queue = BinaryHeap::new();
    let mut sequence = 0u64;
    distances[start] = 0.0;
    queue.push(QueueEntry::new(start, 0.0, sequence));

    while let Some(entry) = queue.pop() {
        if entry.cost.0 > distances[entry.node] {
            continue;
        }
        for edge in graph.neighbours(entry.node) {
            let next_cost = entry.cost.0 + edge.distance;
            if next_cost < distances[edge.target] {
                distances[edge.target] = next_cost;
                sequence += 1;
                queue.push(QueueEntry::new(edge.target, next_cost, sequence));
            }
        }
    }

    distances
}

/// Follow back-pointers from `goal` to `start`.
///
/// Returns `None` if the chain breaks or loops before reaching `start`.
fn reconstruct_path(
    parents: &[Option<NodeId>],
    start: NodeId,
    goal: NodeId,
) -> Option<Vec<NodeId>> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = parents.get(current).copied().flatten()?;
        path.push(current);
        if path.len() > parents.len() {
            return None;
        }
    }
    path.reverse();
    Some(path)
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: FloatOrd,
    sequence: u64,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64, sequence: u64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            sequence,
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry {
    node: NodeId,
    cost: FloatOrd,
    estimate: FloatOrd,
    sequence: u64,
}

impl AStarEntry {
    fn new(node: NodeId, cost: f64, estimate: f64, sequence: u64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(estimate),
            sequence,
        }
    }
}

impl Ord for AStarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.cost.cmp(&self.cost))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for AStarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
