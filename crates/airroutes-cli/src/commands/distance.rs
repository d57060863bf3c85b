//! Distance command handler for arbitrary coordinate pairs.

use anyhow::Result;
use serde::Serialize;

use airroutes_cli::output::{render_distance, render_json, OutputFormat};
use airroutes_cli::terminal::ColorPalette;
use airroutes_lib::{distance, FlightDuration, FlightProfile, GeoPoint};

#[derive(Serialize)]
struct DistanceOutput {
    from: GeoPoint,
    to: GeoPoint,
    distance_km: f64,
    duration: FlightDuration,
}

pub fn handle_distance_command(
    profile: &FlightProfile,
    format: OutputFormat,
    from: GeoPoint,
    to: GeoPoint,
) -> Result<()> {
    let km = distance(from, to);
    let duration = profile.estimate(km);

    match format {
        OutputFormat::Text => print!(
            "{}",
            render_distance(from, to, km, duration, &ColorPalette::detect())
        ),
        OutputFormat::Json => {
            let output = DistanceOutput {
                from,
                to,
                distance_km: km,
                duration,
            };
            println!("{}", render_json(&output)?);
        }
    }
    Ok(())
}
