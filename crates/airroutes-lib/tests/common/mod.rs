//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use airroutes_lib::{load_dataset, resolve_dataset, Dataset};

/// Path to fixtures directory used by tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Load the fixture routes and airlines tables.
#[allow(dead_code)]
pub fn fixture_dataset() -> Dataset {
    let paths =
        resolve_dataset(Some(fixtures_dir().as_path())).expect("fixture dataset resolves");
    load_dataset(&paths).expect("fixture dataset loads")
}
