//! Route command handler for computing paths between cities.

use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};

use cityroute_lib::{RouteAlgorithm, RouteOutcome, RouteRequest, RouteSummary};

use crate::commands::load_service;
use crate::output::{write_route, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone, Default)]
pub struct RouteCommandArgs {
    /// Starting city name.
    pub from: String,
    /// Destination city name.
    pub to: String,
    /// Algorithm to use when planning the route.
    pub algorithm: RouteAlgorithm,
    /// Restrict the search to these cities.
    pub allow: Vec<String>,
    /// Identity to record the search under.
    pub user: Option<String>,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest {
            from: self.from.clone(),
            to: self.to.clone(),
            algorithm: self.algorithm,
            allowed_cities: self.allow.clone(),
            requested_by: self.user.clone(),
        }
    }
}

/// Handle the route subcommand.
///
/// Unknown cities and unreachable destinations are reported as errors so the
/// process exits non-zero.
pub fn handle_route_command(
    target_path: Option<&Path>,
    args: &RouteCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let service = load_service(target_path)?;
    let outcome = service
        .find_route(&args.to_request())
        .context("route computation failed")?;

    let result = match outcome {
        RouteOutcome::Found(result) => result,
        other => bail!(other
            .message()
            .unwrap_or_else(|| "route not found".to_string())),
    };

    let summary = RouteSummary::from_result(&result, service.graph())?;
    let stdout = io::stdout();
    write_route(&mut stdout.lock(), format, &summary, &result)
        .context("failed to write route output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_request_carries_every_option() {
        let args = RouteCommandArgs {
            from: "Ballari".into(),
            to: "Gadag".into(),
            algorithm: RouteAlgorithm::Dijkstra,
            allow: vec!["Ballari".into(), "Hospet".into()],
            user: Some("ada".into()),
        };
        let request = args.to_request();
        assert_eq!(request.from, "Ballari");
        assert_eq!(request.to, "Gadag");
        assert_eq!(request.algorithm, RouteAlgorithm::Dijkstra);
        assert_eq!(request.allowed_cities.len(), 2);
        assert_eq!(request.requested_by.as_deref(), Some("ada"));
    }
}
