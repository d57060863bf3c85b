//! Stats command handler for per-country aggregates.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use airroutes_cli::output::{render_json, render_stats, OutputFormat};
use airroutes_cli::terminal::{supports_unicode, ColorPalette};
use airroutes_lib::{AppConfig, ChartSettings, CountryStats};

use super::load_dataset_from;

#[derive(Serialize)]
struct StatsOutput<'a> {
    chart: ChartSettings,
    #[serde(flatten)]
    stats: &'a CountryStats,
}

pub fn handle_stats_command(
    target: Option<&Path>,
    config: &AppConfig,
    format: OutputFormat,
    top: Option<usize>,
    active_only: bool,
) -> Result<()> {
    let dataset = load_dataset_from(target)?;
    let mut chart = config.chart;
    if let Some(top) = top {
        chart.top_n = top;
    }

    let stats = CountryStats::compute(&dataset, Some(chart.top_n), active_only);

    match format {
        OutputFormat::Text => print!(
            "{}",
            render_stats(&stats, &ColorPalette::detect(), supports_unicode())
        ),
        OutputFormat::Json => println!(
            "{}",
            render_json(&StatsOutput {
                chart,
                stats: &stats,
            })?
        ),
    }
    Ok(())
}
