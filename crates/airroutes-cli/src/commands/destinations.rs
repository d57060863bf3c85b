//! Destinations command handler listing airports reachable from a source.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use airroutes_cli::output::{render_destinations, render_json, OutputFormat};
use airroutes_cli::terminal::ColorPalette;
use airroutes_lib::Destination;

use super::{load_dataset_from, normalize_code};

#[derive(Serialize)]
struct DestinationsOutput<'a> {
    source: &'a str,
    destinations: Vec<Destination>,
}

/// Handle the destinations subcommand.
///
/// An unknown source code is an error (with suggestions); a known airport
/// without outgoing routes prints an empty list.
pub fn handle_destinations_command(
    target: Option<&Path>,
    format: OutputFormat,
    from: &str,
) -> Result<()> {
    let dataset = load_dataset_from(target)?;
    let code = normalize_code(from);
    let source = dataset.routes.require_airport(&code)?;
    let destinations = dataset.routes.valid_destinations(&code);

    match format {
        OutputFormat::Text => print!(
            "{}",
            render_destinations(source, &destinations, &ColorPalette::detect())
        ),
        OutputFormat::Json => {
            let output = DestinationsOutput {
                source: &source.code,
                destinations: destinations.into_iter().collect(),
            };
            println!("{}", render_json(&output)?);
        }
    }
    Ok(())
}
