//! Sources command handler listing airports with outgoing routes.

use std::path::Path;

use anyhow::Result;

use airroutes_cli::output::{render_json, render_sources, OutputFormat};
use airroutes_cli::terminal::ColorPalette;

use super::load_dataset_from;

pub fn handle_sources_command(target: Option<&Path>, format: OutputFormat) -> Result<()> {
    let dataset = load_dataset_from(target)?;
    let sources = dataset.routes.source_airports();

    match format {
        OutputFormat::Text => print!("{}", render_sources(&sources, &ColorPalette::detect())),
        OutputFormat::Json => println!("{}", render_json(&sources)?),
    }
    Ok(())
}
