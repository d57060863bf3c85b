// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs dispatches to these
// handlers, keeping the entry point focused on parsing and coordination.

pub mod destinations;
pub mod distance;
pub mod route;
pub mod sources;
pub mod stats;

use std::path::Path;

use anyhow::{Context, Result};

use airroutes_lib::{load_dataset, resolve_dataset, Dataset};

/// Locate and load the dataset, attaching the resolved path to any failure.
pub fn load_dataset_from(target: Option<&Path>) -> Result<Dataset> {
    let paths = resolve_dataset(target).context("failed to locate the route dataset")?;
    load_dataset(&paths)
        .with_context(|| format!("failed to load dataset from {}", paths.routes.display()))
}

/// Airport codes are matched exactly; normalise user input to dataset casing.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
