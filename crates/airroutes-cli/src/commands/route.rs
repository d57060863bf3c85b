//! Route command handler resolving a source/destination selection.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use airroutes_cli::output::{render_json, render_route, OutputFormat, NO_ROUTE_MESSAGE};
use airroutes_cli::terminal::ColorPalette;
use airroutes_lib::{AppConfig, Error, MapSettings, RouteReport, Selection};

use super::{load_dataset_from, normalize_code};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Source airport code.
    pub from: String,
    /// Destination airport code.
    pub to: String,
    /// Override for the configured cruise speed (km/h).
    pub cruise_speed: Option<f64>,
    /// Override for the configured overhead factor.
    pub overhead_factor: Option<f64>,
}

#[derive(Serialize)]
struct RouteOutput<'a> {
    route: Option<&'a RouteReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
    map: MapSettings,
}

/// Handle the route subcommand.
///
/// A pair without a route row is reported as a warning and the command
/// still succeeds. Unknown codes are reported the same way, with their
/// suggestions attached.
pub fn handle_route_command(
    target: Option<&Path>,
    config: &AppConfig,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let mut profile = config.flight;
    if let Some(speed) = args.cruise_speed {
        profile.cruise_speed_kmh = speed;
    }
    if let Some(factor) = args.overhead_factor {
        profile.overhead_factor = factor;
    }
    profile.validate().context("invalid flight profile")?;

    let dataset = load_dataset_from(target)?;
    let selection = Selection::new(normalize_code(&args.from), normalize_code(&args.to));
    debug!(source = %selection.source, destination = %selection.destination, "resolving route");

    let mut detail = None;
    let report = match dataset.routes.plan(&selection, &profile) {
        Ok(report) => Some(report),
        Err(error) if error.is_route_not_found() => None,
        Err(error @ Error::UnknownAirport { .. }) => {
            detail = Some(error.to_string());
            None
        }
        Err(error) => return Err(error.into()),
    };

    match format {
        OutputFormat::Text => match &report {
            Some(report) => print!("{}", render_route(report, &ColorPalette::detect())),
            None => {
                let palette = ColorPalette::detect();
                if let Some(detail) = &detail {
                    eprintln!("{}{}{}", palette.orange, detail, palette.reset);
                }
                eprintln!("{}{}{}", palette.orange, NO_ROUTE_MESSAGE, palette.reset);
            }
        },
        OutputFormat::Json => {
            let output = RouteOutput {
                route: report.as_ref(),
                message: report.is_none().then_some(NO_ROUTE_MESSAGE),
                detail: detail.as_deref(),
                map: config.map,
            };
            println!("{}", render_json(&output)?);
        }
    }
    Ok(())
}
