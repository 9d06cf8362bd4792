// Module exports for CLI subcommands
//
// Each module handles one subcommand; main.rs parses arguments and dispatches
// to these handlers.

pub mod locations;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};

use cityroute_lib::{load_reference_data, sink_from_env, RouteService, RouteServiceConfig};

/// Load the dataset and build a route service with the environment's
/// activity sink.
pub fn load_service(target: Option<&Path>) -> Result<RouteService> {
    let data = load_reference_data(target).context("failed to load the city dataset")?;
    let sink = sink_from_env().context("failed to open the activity history")?;
    Ok(RouteService::new(data, RouteServiceConfig::default()).with_activity_sink(sink))
}
