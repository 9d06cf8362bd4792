//! Output formatting for CLI results.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use cityroute_lib::{CoordinateTable, RouteRenderMode, RouteSummary};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Markdown suitable for notes and chat.
    Rich,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    fn render_mode(self) -> RouteRenderMode {
        match self {
            OutputFormat::Rich => RouteRenderMode::RichText,
            OutputFormat::Text | OutputFormat::Json => RouteRenderMode::PlainText,
        }
    }
}

/// Write a route in the requested format.
pub fn write_route<W: Write, T: Serialize>(
    out: &mut W,
    format: OutputFormat,
    summary: &RouteSummary,
    json: &T,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, json),
        other => write!(out, "{}", summary.render(other.render_mode())),
    }
}

/// Write location names, one per line, or as a JSON array.
pub fn write_locations<W: Write>(
    out: &mut W,
    format: OutputFormat,
    locations: &[String],
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, &locations),
        OutputFormat::Rich => {
            for name in locations {
                writeln!(out, "* {name}")?;
            }
            Ok(())
        }
        OutputFormat::Text => {
            for name in locations {
                writeln!(out, "{name}")?;
            }
            Ok(())
        }
    }
}

/// Write the coordinate table.
pub fn write_coordinates<W: Write>(
    out: &mut W,
    format: OutputFormat,
    coordinates: &CoordinateTable,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, coordinates),
        OutputFormat::Text | OutputFormat::Rich => {
            for (name, coordinate) in coordinates.iter() {
                writeln!(
                    out,
                    "{name}: {:.4}, {:.4}",
                    coordinate.latitude, coordinate.longitude
                )?;
            }
            Ok(())
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityroute_lib::Coordinate;

    #[test]
    fn locations_render_per_format() {
        let names = vec!["Ballari".to_string(), "Hospet".to_string()];

        let mut text = Vec::new();
        write_locations(&mut text, OutputFormat::Text, &names).unwrap();
        assert_eq!(String::from_utf8(text).unwrap(), "Ballari\nHospet\n");

        let mut rich = Vec::new();
        write_locations(&mut rich, OutputFormat::Rich, &names).unwrap();
        assert_eq!(String::from_utf8(rich).unwrap(), "* Ballari\n* Hospet\n");

        let mut json = Vec::new();
        write_locations(&mut json, OutputFormat::Json, &names).unwrap();
        let parsed: Vec<String> = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed, names);
    }

    #[test]
    fn coordinates_render_as_pairs() {
        let mut table = CoordinateTable::new();
        table.insert("Ballari", Coordinate::new(15.1394, 76.9214));

        let mut text = Vec::new();
        write_coordinates(&mut text, OutputFormat::Text, &table).unwrap();
        assert_eq!(String::from_utf8(text).unwrap(), "Ballari: 15.1394, 76.9214\n");

        let mut json = Vec::new();
        write_coordinates(&mut json, OutputFormat::Json, &table).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed["Ballari"][0], 15.1394);
    }
}
