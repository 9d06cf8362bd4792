//! Handlers for listing cities and their coordinates.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use crate::commands::load_service;
use crate::output::{write_coordinates, write_locations, OutputFormat};

/// Print every routable location and major city.
pub fn handle_cities_command(target_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let service = load_service(target_path)?;
    let stdout = io::stdout();
    write_locations(&mut stdout.lock(), format, &service.locations())
        .context("failed to write locations")
}

/// Print the coordinate table.
pub fn handle_coordinates_command(target_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let service = load_service(target_path)?;
    let stdout = io::stdout();
    write_coordinates(&mut stdout.lock(), format, service.coordinates())
        .context("failed to write coordinates")
}
