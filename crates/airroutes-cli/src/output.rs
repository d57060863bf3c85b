//! Output formatting for the CLI.
//!
//! Renderers return strings so they can be tested without capturing stdout;
//! the command handlers print them.

use std::collections::BTreeSet;
use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use airroutes_lib::{
    Airport, CountryCount, CountryStats, Destination, FlightDuration, GeoPoint, RouteReport,
};

use crate::terminal::{format_with_separators, ColorPalette};

/// Message shown when the selected pair has no route row.
pub const NO_ROUTE_MESSAGE: &str =
    "No routes found for the selected source and destination airports.";

/// Width, in characters, of the longest bar in a text chart.
const BAR_WIDTH: usize = 40;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Serialise any value as pretty JSON.
pub fn render_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn timezone_suffix(timezone: Option<i32>) -> String {
    match timezone {
        Some(0) => " [GMT]".to_string(),
        Some(offset) => format!(" [GMT{:+}]", offset),
        None => String::new(),
    }
}

/// List airports that have at least one outgoing route.
pub fn render_sources(airports: &[&Airport], palette: &ColorPalette) -> String {
    let mut buffer = String::new();
    let _ = writeln!(buffer, "Source airports ({}):", airports.len());
    for airport in airports {
        let country = airport
            .country
            .as_deref()
            .map(|c| format!(" ({c})"))
            .unwrap_or_default();
        let _ = writeln!(
            buffer,
            "  {}{:<4}{} {}{}{}{}",
            palette.white_bold,
            airport.code,
            palette.reset,
            airport.name,
            palette.gray,
            country,
            palette.reset
        );
    }
    buffer
}

/// List the destinations reachable from `source`.
pub fn render_destinations(
    source: &Airport,
    destinations: &BTreeSet<Destination>,
    palette: &ColorPalette,
) -> String {
    let mut buffer = String::new();
    if destinations.is_empty() {
        let _ = writeln!(
            buffer,
            "No destinations from {} ({}).",
            source.name, source.code
        );
        return buffer;
    }

    let _ = writeln!(
        buffer,
        "Destinations from {} ({}): {}",
        source.name,
        source.code,
        destinations.len()
    );
    for destination in destinations {
        let _ = writeln!(
            buffer,
            "  {}{:<4}{} {}{}{}{}",
            palette.white_bold,
            destination.code,
            palette.reset,
            destination.name,
            palette.gray,
            timezone_suffix(destination.timezone),
            palette.reset
        );
    }
    buffer
}

/// Render a resolved route.
pub fn render_route(report: &RouteReport, palette: &ColorPalette) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "{}{}{} {} -> {}{}{} {}",
        palette.white_bold,
        report.source.code,
        palette.reset,
        report.source.name,
        palette.white_bold,
        report.destination.code,
        palette.reset,
        report.destination.name
    );
    let _ = writeln!(
        buffer,
        "Distance between: {} and {} is: {}{:.2} km{}",
        report.source.code, report.destination.code, palette.cyan, report.distance_km, palette.reset
    );
    let _ = writeln!(
        buffer,
        "Estimated flight time: {} (cruise {:.0} km/h, overhead x{})",
        report.duration, report.profile.cruise_speed_kmh, report.profile.overhead_factor
    );
    if let (Some(from), Some(to)) = (
        report.source.timezone_label(),
        report.destination.timezone_label(),
    ) {
        let _ = write!(buffer, "Timezones: {} -> {}", from, to);
        if let Some(diff) = report.timezone_difference_hours {
            let _ = write!(buffer, " ({:+}h)", diff);
        }
        let _ = writeln!(buffer);
    }
    let _ = writeln!(
        buffer,
        "{}Map bounds: {} to {}{}",
        palette.gray, report.bounds.south_west, report.bounds.north_east, palette.reset
    );
    buffer
}

/// Render a bare point-to-point distance.
pub fn render_distance(
    from: GeoPoint,
    to: GeoPoint,
    km: f64,
    duration: FlightDuration,
    palette: &ColorPalette,
) -> String {
    format!(
        "Distance between: {} and {} is: {}{:.2} km{}\nEstimated flight time: {}\n",
        from, to, palette.cyan, km, palette.reset, duration
    )
}

/// Render summary metrics followed by one bar chart per aggregate.
pub fn render_stats(stats: &CountryStats, palette: &ColorPalette, unicode: bool) -> String {
    let mut buffer = String::new();
    let summary = &stats.summary;
    let _ = writeln!(
        buffer,
        "Airports: {}  Routes: {}  Airlines: {}  Countries: {}",
        format_with_separators(summary.airports as u64),
        format_with_separators(summary.routes as u64),
        format_with_separators(summary.airlines as u64),
        format_with_separators(summary.countries as u64),
    );

    for (title, counts) in [
        ("Airports per country", &stats.airports),
        ("Routes per country", &stats.routes),
        ("Airlines per country", &stats.airlines),
    ] {
        let _ = writeln!(buffer);
        render_chart(&mut buffer, title, counts, palette, unicode);
    }
    buffer
}

fn render_chart(
    buffer: &mut String,
    title: &str,
    counts: &[CountryCount],
    palette: &ColorPalette,
    unicode: bool,
) {
    let _ = writeln!(buffer, "{title}:");
    if counts.is_empty() {
        let _ = writeln!(buffer, "  (no data)");
        return;
    }

    let glyph = if unicode { "█" } else { "#" };
    let max = counts.iter().map(|c| c.count).max().unwrap_or(1).max(1);
    let label_width = counts
        .iter()
        .map(|c| c.country.chars().count())
        .max()
        .unwrap_or(0);

    for entry in counts {
        // Non-zero counts always get at least one glyph.
        let length = ((entry.count * BAR_WIDTH) / max).max(1);
        let _ = writeln!(
            buffer,
            "  {:<width$} {}{}{} {}",
            entry.country,
            palette.green,
            glyph.repeat(length),
            palette.reset,
            format_with_separators(entry.count as u64),
            width = label_width
        );
    }
}
