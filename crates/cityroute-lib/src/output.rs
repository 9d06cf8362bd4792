use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::geo::Coordinate;
use crate::graph::Graph;
use crate::routing::{RouteAlgorithm, RouteResult};

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Stop along a rendered route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub name: String,
    /// Distance of the hop arriving at this stop; `None` for the first stop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_km: Option<f64>,
    pub coordinate: Option<Coordinate>,
}

/// Route result arranged for display.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub hops: usize,
    pub distance_km: f64,
    pub time: String,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Build a summary, looking up per-hop distances in `graph`.
    pub fn from_result(result: &RouteResult, graph: &Graph) -> Result<Self> {
        if result.path.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        let steps = result
            .path
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let leg_km = index
                    .checked_sub(1)
                    .and_then(|prev| graph.node_id(&result.path[prev]))
                    .zip(graph.node_id(name))
                    .and_then(|(from, to)| graph.edge_weight(from, to));
                RouteStep {
                    index,
                    name: name.clone(),
                    leg_km,
                    coordinate: result.coordinates.get(index).copied().flatten(),
                }
            })
            .collect();

        Ok(Self {
            algorithm: result.algorithm,
            hops: result.hops,
            distance_km: result.distance_km,
            time: result.time_label(),
            steps,
        })
    }

    fn start(&self) -> &str {
        self.steps.first().map_or("<unknown>", |step| step.name.as_str())
    }

    fn goal(&self) -> &str {
        self.steps.last().map_or("<unknown>", |step| step.name.as_str())
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, algorithm: {})",
            self.start(),
            self.goal(),
            self.hops,
            self.algorithm
        );
        for step in &self.steps {
            match step.leg_km {
                Some(leg) => {
                    let _ = writeln!(buffer, "{:>3}: {} (+{} km)", step.index, step.name, leg);
                }
                None => {
                    let _ = writeln!(buffer, "{:>3}: {}", step.index, step.name);
                }
            }
        }
        let _ = writeln!(
            buffer,
            "Distance: {} km, estimated time: {}",
            self.distance_km, self.time
        );
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} to {}_ ({} hops, algorithm: `{}`)",
            self.start(),
            self.goal(),
            self.hops,
            self.algorithm
        );
        for step in &self.steps {
            let location = step
                .coordinate
                .map(|c| format!(" `{:.4}, {:.4}`", c.latitude, c.longitude))
                .unwrap_or_default();
            let _ = writeln!(buffer, "* {:>2}. **{}**{}", step.index, step.name, location);
        }
        let _ = writeln!(
            buffer,
            "\n**{} km**, about {}",
            self.distance_km, self.time
        );
        buffer
    }
}
