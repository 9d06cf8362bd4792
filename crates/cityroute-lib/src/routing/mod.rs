//! Route planning facade.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported routing algorithms (A*, Dijkstra)
//! - [`RouteRequest`] - A single route query
//! - [`RouteService`] - Owns the reference data and answers queries
//! - [`RouteOutcome`] - Found route, unknown city, or no route
//!
//! # Strategy Pattern
//!
//! Searches go through the [`RoutePlanner`] trait. Each algorithm is wrapped
//! in its own planner struct, so the facade only chooses one per request.
//!
//! # Example
//!
//! ```ignore
//! use cityroute_lib::{ReferenceData, RouteRequest, RouteService, RouteServiceConfig};
//!
//! let service = RouteService::new(ReferenceData::embedded()?, RouteServiceConfig::default());
//! let outcome = service.find_route(&RouteRequest::new("Ballari", "Gadag"))?;
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, HeuristicSettings, RoutePlanner};

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::activity::{ActivityRecord, ActivitySink, TracingActivitySink};
use crate::dataset::ReferenceData;
use crate::error::{format_suggestions, Error, Result};
use crate::geo::{admissible_scale, Coordinate, CoordinateTable, MissingCoordinates};
use crate::graph::{build_graph, Graph, NodeId};
use crate::path::SearchLimits;

/// Default travel speed used for time estimates.
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 50.0;

const SUGGESTION_LIMIT: usize = 3;
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// A* search (heuristic guided).
    #[default]
    #[serde(rename = "a-star")]
    AStar,
    /// Dijkstra's algorithm.
    Dijkstra,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::AStar => "a-star",
            RouteAlgorithm::Dijkstra => "dijkstra",
        };
        f.write_str(value)
    }
}

/// A single route query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteRequest {
    pub from: String,
    pub to: String,
    pub algorithm: RouteAlgorithm,
    /// Restrict the search graph to these cities; empty means no restriction.
    pub allowed_cities: Vec<String>,
    /// Identity to attribute the search to in the activity history.
    pub requested_by: Option<String>,
}

impl RouteRequest {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            ..Self::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn allow<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_cities.extend(cities.into_iter().map(Into::into));
        self
    }

    pub fn requested_by(mut self, identity: impl Into<String>) -> Self {
        self.requested_by = Some(identity.into());
        self
    }
}

/// Tunables for [`RouteService`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteServiceConfig {
    pub average_speed_kmh: f64,
    /// Heuristic value for nodes without coordinates.
    pub missing_coordinates: MissingCoordinates,
    /// Scale the heuristic so it never exceeds any located edge weight.
    pub calibrate_heuristic: bool,
    pub limits: SearchLimits,
}

impl Default for RouteServiceConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
            missing_coordinates: MissingCoordinates::Zero,
            calibrate_heuristic: true,
            limits: SearchLimits::default(),
        }
    }
}

/// A computed route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    /// Resolved start name.
    pub from: String,
    /// Resolved destination name.
    pub to: String,
    pub path: Vec<String>,
    /// One entry per path node; `None` where no coordinate is known.
    pub coordinates: Vec<Option<Coordinate>>,
    /// Total distance in kilometres, rounded to two decimals.
    pub distance_km: f64,
    /// Travel time in hours at the configured speed, rounded to two decimals.
    pub time_hours: f64,
    pub algorithm: RouteAlgorithm,
    pub hops: usize,
}

impl RouteResult {
    /// Time estimate as shown to users, e.g. `"1.2 hours"` or `"7.0 hours"`.
    ///
    /// Whole hours keep one decimal place.
    pub fn time_label(&self) -> String {
        format!("{:?} hours", self.time_hours)
    }
}

/// An input name that matched no city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedCity {
    pub name: String,
    pub suggestions: Vec<String>,
}

/// Result of a route query.
///
/// Unknown cities and disconnected endpoints are ordinary outcomes, not
/// errors.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Found(RouteResult),
    CityNotFound { unresolved: Vec<UnresolvedCity> },
    NoRoute { from: String, to: String },
}

impl RouteOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }

    pub fn route(&self) -> Option<&RouteResult> {
        match self {
            RouteOutcome::Found(result) => Some(result),
            _ => None,
        }
    }

    /// Human-readable explanation for outcomes without a route.
    pub fn message(&self) -> Option<String> {
        match self {
            RouteOutcome::Found(_) => None,
            RouteOutcome::CityNotFound { unresolved } => {
                let mut message = String::from("One or both cities not found on server.");
                for city in unresolved {
                    message.push_str(&format!(
                        " Unknown city '{}'.{}",
                        city.name,
                        format_suggestions(&city.suggestions)
                    ));
                }
                Some(message)
            }
            RouteOutcome::NoRoute { from, to } => {
                Some(format!("No route found between {from} and {to}."))
            }
        }
    }
}

/// Answers route queries against one immutable copy of the reference data.
///
/// The routing graph is built once on construction. Clones share it.
#[derive(Clone)]
pub struct RouteService {
    data: Arc<ReferenceData>,
    graph: Graph,
    heuristic: HeuristicSettings,
    config: RouteServiceConfig,
    sink: Arc<dyn ActivitySink>,
}

impl fmt::Debug for RouteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteService")
            .field("nodes", &self.graph.len())
            .field("heuristic", &self.heuristic)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RouteService {
    pub fn new(data: impl Into<Arc<ReferenceData>>, config: RouteServiceConfig) -> Self {
        let data = data.into();
        let graph = build_graph(&data.graph, &[]);
        let scale = if config.calibrate_heuristic {
            admissible_scale(&graph, &data.coordinates)
        } else {
            1.0
        };
        debug!(
            nodes = graph.len(),
            edges = graph.edge_count(),
            heuristic_scale = scale,
            "route service ready"
        );

        Self {
            data,
            graph,
            heuristic: HeuristicSettings {
                missing: config.missing_coordinates,
                scale,
            },
            config,
            sink: Arc::new(TracingActivitySink),
        }
    }

    /// Replace the activity sink (defaults to [`TracingActivitySink`]).
    pub fn with_activity_sink(mut self, sink: Arc<dyn ActivitySink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    pub fn config(&self) -> &RouteServiceConfig {
        &self.config
    }

    /// Scale applied to great-circle estimates.
    pub fn heuristic_scale(&self) -> f64 {
        self.heuristic.scale
    }

    /// Sorted, de-duplicated names of major cities and graph nodes.
    pub fn locations(&self) -> Vec<String> {
        let mut names: BTreeSet<&str> = self.data.major_cities.iter().map(String::as_str).collect();
        names.extend(self.graph.names());
        names.into_iter().map(str::to_string).collect()
    }

    pub fn coordinates(&self) -> &CoordinateTable {
        &self.data.coordinates
    }

    /// Coordinates for each name in `path`, aligned by index.
    pub fn coordinates_for_path<S: AsRef<str>>(&self, path: &[S]) -> Vec<Option<Coordinate>> {
        self.data.coordinates.project_path(path)
    }

    /// Answer a route query.
    ///
    /// Returns `Err` only for internal failures. Activity notification is
    /// best-effort and never affects the outcome.
    pub fn find_route(&self, request: &RouteRequest) -> Result<RouteOutcome> {
        let graph = if request.allowed_cities.is_empty() {
            self.graph.clone()
        } else {
            build_graph(&self.data.graph, &request.allowed_cities)
        };

        let from = graph.resolve(&request.from);
        let to = graph.resolve(&request.to);
        let (start, goal) = match (from, to) {
            (Some(start), Some(goal)) => (start, goal),
            _ => {
                let unresolved: Vec<UnresolvedCity> = [(from, &request.from), (to, &request.to)]
                    .into_iter()
                    .filter(|(resolved, _)| resolved.is_none())
                    .map(|(_, name)| unresolved_city(&graph, name))
                    .collect();
                info!(from = %request.from, to = %request.to, "route endpoint not found");
                return Ok(RouteOutcome::CityNotFound { unresolved });
            }
        };

        let planner = select_planner(
            request.algorithm,
            &self.data.coordinates,
            self.heuristic,
            self.config.limits,
        );
        let outcome = planner.find_path(&graph, start, goal);

        let from_name = node_name(&graph, start)?;
        let to_name = node_name(&graph, goal)?;
        let Some(ids) = outcome.path else {
            info!(
                from = from_name,
                to = to_name,
                expanded = outcome.expanded,
                "no route found"
            );
            return Ok(RouteOutcome::NoRoute {
                from: from_name.to_string(),
                to: to_name.to_string(),
            });
        };
        if ids.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        let path = ids
            .iter()
            .map(|&id| node_name(&graph, id).map(str::to_string))
            .collect::<Result<Vec<_>>>()?;
        let coordinates = self.coordinates_for_path(&path);
        let result = RouteResult {
            from: from_name.to_string(),
            to: to_name.to_string(),
            hops: path.len() - 1,
            path,
            coordinates,
            distance_km: round2(outcome.distance),
            time_hours: round2(outcome.distance / self.config.average_speed_kmh),
            algorithm: planner.algorithm(),
        };
        info!(
            from = %result.from,
            to = %result.to,
            algorithm = %result.algorithm,
            distance_km = result.distance_km,
            hops = result.hops,
            expanded = outcome.expanded,
            "route found"
        );

        if let Some(identity) = &request.requested_by {
            if let Err(error) = self
                .sink
                .record(ActivityRecord::route_search(identity.as_str(), &result))
            {
                warn!(%error, identity = %identity, "failed to record route activity");
            }
        }

        Ok(RouteOutcome::Found(result))
    }
}

fn node_name(graph: &Graph, id: NodeId) -> Result<&str> {
    graph.node_name(id).ok_or_else(|| Error::InvalidDataset {
        message: format!("node id {id} missing from routing graph"),
    })
}

fn unresolved_city(graph: &Graph, name: &str) -> UnresolvedCity {
    let needle = name.trim().to_lowercase();
    let mut scored: Vec<(f64, &str)> = graph
        .names()
        .map(|candidate| {
            let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
            (score, candidate)
        })
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));

    UnresolvedCity {
        name: name.to_string(),
        suggestions: scored
            .into_iter()
            .take(SUGGESTION_LIMIT)
            .map(|(_, candidate)| candidate.to_string())
            .collect(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
