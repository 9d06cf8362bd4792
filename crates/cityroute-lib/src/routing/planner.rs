//! Route planning strategies.
//!
//! Each algorithm is wrapped in its own planner so the facade can pick one per
//! request without knowing how the search is parameterised.

use crate::geo::{CoordinateTable, GreatCircle, MissingCoordinates};
use crate::graph::{Graph, NodeId};
use crate::path::{find_route_a_star, find_route_dijkstra, SearchLimits, SearchOutcome};

use super::RouteAlgorithm;

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Search `graph` for the shortest path from `start` to `goal`.
    fn find_path(&self, graph: &Graph, start: NodeId, goal: NodeId) -> SearchOutcome;
}

/// A* planner guided by great-circle distance.
#[derive(Debug, Clone, Copy)]
pub struct AStarPlanner<'a> {
    heuristic: GreatCircle<'a>,
    limits: SearchLimits,
}

impl<'a> AStarPlanner<'a> {
    pub fn new(heuristic: GreatCircle<'a>, limits: SearchLimits) -> Self {
        Self { heuristic, limits }
    }
}

impl RoutePlanner for AStarPlanner<'_> {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(&self, graph: &Graph, start: NodeId, goal: NodeId) -> SearchOutcome {
        find_route_a_star(graph, start, goal, &self.heuristic, &self.limits)
    }
}

/// Uniform-cost planner; ignores coordinates entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPlanner {
    limits: SearchLimits,
}

impl DijkstraPlanner {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }
}

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(&self, graph: &Graph, start: NodeId, goal: NodeId) -> SearchOutcome {
        find_route_dijkstra(graph, start, goal, &self.limits)
    }
}

/// Heuristic parameters shared by every A* planner a facade creates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicSettings {
    pub missing: MissingCoordinates,
    pub scale: f64,
}

impl Default for HeuristicSettings {
    fn default() -> Self {
        Self {
            missing: MissingCoordinates::default(),
            scale: 1.0,
        }
    }
}

/// Select the planner for `algorithm`.
pub fn select_planner<'a>(
    algorithm: RouteAlgorithm,
    coordinates: &'a CoordinateTable,
    heuristic: HeuristicSettings,
    limits: SearchLimits,
) -> Box<dyn RoutePlanner + 'a> {
    match algorithm {
        RouteAlgorithm::AStar => {
            let great_circle = GreatCircle::new(coordinates)
                .with_missing(heuristic.missing)
                .with_scale(heuristic.scale);
            Box::new(AStarPlanner::new(great_circle, limits))
        }
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner::new(limits)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::GraphFixture;

    #[test]
    fn select_planner_matches_algorithm() {
        let coordinates = CoordinateTable::new();
        for algorithm in [RouteAlgorithm::AStar, RouteAlgorithm::Dijkstra] {
            let planner = select_planner(
                algorithm,
                &coordinates,
                HeuristicSettings::default(),
                SearchLimits::default(),
            );
            assert_eq!(planner.algorithm(), algorithm);
        }
    }

    #[test]
    fn planners_agree_on_fixture() {
        let graph = GraphFixture::new()
            .undirected("A", "B", 2.0)
            .undirected("B", "C", 2.0)
            .undirected("A", "C", 5.0)
            .build();
        let coordinates = CoordinateTable::new();
        let a = graph.node_id("A").unwrap();
        let c = graph.node_id("C").unwrap();

        let a_star = select_planner(
            RouteAlgorithm::AStar,
            &coordinates,
            HeuristicSettings::default(),
            SearchLimits::default(),
        )
        .find_path(&graph, a, c);
        let dijkstra = DijkstraPlanner::default().find_path(&graph, a, c);

        assert_eq!(a_star.distance, 4.0);
        assert_eq!(a_star.path, dijkstra.path);
    }
}
