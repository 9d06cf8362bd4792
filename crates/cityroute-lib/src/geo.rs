//! Geographic helpers: coordinates, great-circle distance, and the search
//! heuristics built on top of them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, NodeId};
use crate::path::shortest_distances;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Estimate returned when either endpoint has no coordinate on record.
///
/// Large enough to dominate any real edge weight while staying finite so it
/// can be added to path costs.
pub const MISSING_COORDINATE_ESTIMATE_KM: f64 = 1.0e6;

/// Latitude/longitude pair in degrees.
///
/// Serialised as a two-element `[lat, lng]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn haversine_km(&self, other: &Self) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();
        EARTH_RADIUS_KM * c
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.latitude, value.longitude]
    }
}

/// Per-city coordinate lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoordinateTable {
    entries: BTreeMap<String, Coordinate>,
}

impl CoordinateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, coordinate: Coordinate) {
        self.entries.insert(name.into(), coordinate);
    }

    pub fn get(&self, name: &str) -> Option<Coordinate> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Coordinate)> {
        self.entries.iter().map(|(name, coord)| (name.as_str(), *coord))
    }

    /// Estimated distance between two named places in kilometres.
    ///
    /// Returns [`MISSING_COORDINATE_ESTIMATE_KM`] when either place is
    /// unknown. Note that this sentinel is not a lower bound on the true
    /// distance, so using it as an A* heuristic on graphs that mix located
    /// and unlocated nodes can produce non-optimal routes. See
    /// [`MissingCoordinates::Zero`] for the optimality-preserving variant.
    pub fn estimate_km(&self, from: &str, to: &str) -> f64 {
        match (self.get(from), self.get(to)) {
            (Some(a), Some(b)) => a.haversine_km(&b),
            _ => MISSING_COORDINATE_ESTIMATE_KM,
        }
    }

    /// Map an ordered node path to coordinates, keeping indices aligned.
    pub fn project_path<S: AsRef<str>>(&self, path: &[S]) -> Vec<Option<Coordinate>> {
        path.iter().map(|name| self.get(name.as_ref())).collect()
    }
}

impl FromIterator<(String, Coordinate)> for CoordinateTable {
    fn from_iter<T: IntoIterator<Item = (String, Coordinate)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Remaining-distance estimate used to guide A*.
pub trait Heuristic {
    /// Estimated cost from `from` to `to` in the same unit as edge weights.
    fn estimate(&self, graph: &Graph, from: NodeId, to: NodeId) -> f64;
}

/// Heuristic that always returns zero; A* degenerates to Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _graph: &Graph, _from: NodeId, _to: NodeId) -> f64 {
        0.0
    }
}

/// What the great-circle heuristic returns when a node has no coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCoordinates {
    /// Return [`MISSING_COORDINATE_ESTIMATE_KM`].
    Sentinel,
    /// Return zero, which never overestimates.
    #[default]
    Zero,
}

/// Haversine heuristic over a coordinate table.
#[derive(Debug, Clone, Copy)]
pub struct GreatCircle<'a> {
    coordinates: &'a CoordinateTable,
    missing: MissingCoordinates,
    scale: f64,
}

impl<'a> GreatCircle<'a> {
    /// Unscaled heuristic using the sentinel for unknown coordinates.
    pub fn new(coordinates: &'a CoordinateTable) -> Self {
        Self {
            coordinates,
            missing: MissingCoordinates::Sentinel,
            scale: 1.0,
        }
    }

    pub fn with_missing(mut self, missing: MissingCoordinates) -> Self {
        self.missing = missing;
        self
    }

    /// Multiply every located estimate by `scale`, clamped to `[0, 1]`.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = if scale.is_finite() {
            scale.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Heuristic for GreatCircle<'_> {
    fn estimate(&self, graph: &Graph, from: NodeId, to: NodeId) -> f64 {
        let located = graph
            .node_name(from)
            .and_then(|name| self.coordinates.get(name))
            .zip(graph.node_name(to).and_then(|name| self.coordinates.get(name)));

        match (located, self.missing) {
            (Some((a, b)), _) => self.scale * a.haversine_km(&b),
            (None, MissingCoordinates::Sentinel) => MISSING_COORDINATE_ESTIMATE_KM,
            (None, MissingCoordinates::Zero) => 0.0,
        }
    }
}

/// Largest factor `s <= 1` such that `s * haversine(u, t) <= d(u, t)` holds
/// for every pair of located nodes where `t` is reachable from `u`, with
/// `d` the shortest-path distance in `graph`.
///
/// Road distances in hand-curated data are sometimes shorter than the
/// straight-line distance between the recorded coordinates. Scaling the
/// great-circle estimate by this factor keeps it a lower bound, which A*
/// needs to return optimal routes. Runs one full Dijkstra per located node.
pub fn admissible_scale(graph: &Graph, coordinates: &CoordinateTable) -> f64 {
    let located: Vec<(NodeId, Coordinate)> = graph
        .node_ids()
        .filter_map(|id| {
            let name = graph.node_name(id)?;
            coordinates.get(name).map(|coordinate| (id, coordinate))
        })
        .collect();

    let mut scale: f64 = 1.0;
    for &(from, a) in &located {
        let distances = shortest_distances(graph, from);
        for &(to, b) in &located {
            let reachable = distances[to];
            if to == from || !reachable.is_finite() {
                continue;
            }
            let straight = a.haversine_km(&b);
            if straight > 0.0 {
                scale = scale.min(reachable / straight);
            }
        }
    }
    scale.max(0.0)
}
