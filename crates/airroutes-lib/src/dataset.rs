use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Default filename of the merged routes table.
pub const ROUTES_FILENAME: &str = "merged_data.csv";

/// Default filename of the airlines table (OpenFlights layout).
pub const AIRLINES_FILENAME: &str = "airlines.dat";

/// Environment variable overriding the dataset directory.
pub const DATA_DIR_ENV: &str = "AIRROUTES_DATA_DIR";

/// Paths to dataset files.
///
/// Returned by [`resolve_dataset`]. The routes table is mandatory; the
/// airlines table is only recorded when it exists on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    /// Path to the merged routes CSV.
    pub routes: PathBuf,
    /// Path to the airlines table, if present.
    pub airlines: Option<PathBuf>,
}

impl DatasetPaths {
    /// Create paths for a routes file, picking up a sibling airlines table.
    pub fn for_routes(routes: PathBuf) -> Self {
        let candidate = routes
            .parent()
            .map(|dir| dir.join(AIRLINES_FILENAME))
            .unwrap_or_else(|| PathBuf::from(AIRLINES_FILENAME));
        let airlines = if candidate.exists() {
            Some(candidate)
        } else {
            None
        };
        Self { routes, airlines }
    }
}

/// Resolve the default dataset directory using platform-specific project directories.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "airroutes", "airroutes").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Locate the dataset on disk.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided (a directory, or the routes
///    CSV itself).
/// 2. `AIRROUTES_DATA_DIR` environment variable.
/// 3. Platform-specific project data directory.
///
/// Nothing is downloaded; a missing routes table is an error.
pub fn resolve_dataset(target: Option<&Path>) -> Result<DatasetPaths> {
    let routes = if let Some(explicit) = target {
        canonical_routes_path(explicit)
    } else if let Some(env_path) = env::var_os(DATA_DIR_ENV) {
        canonical_routes_path(Path::new(&env_path))
    } else {
        default_data_dir()?.join(ROUTES_FILENAME)
    };

    if !routes.is_file() {
        return Err(Error::DatasetNotFound { path: routes });
    }

    let paths = DatasetPaths::for_routes(routes);
    debug!(
        routes = %paths.routes.display(),
        airlines = ?paths.airlines,
        "resolved dataset"
    );
    Ok(paths)
}

fn canonical_routes_path(path: &Path) -> PathBuf {
    if path.extension().is_some() && !path.is_dir() {
        return path.to_path_buf();
    }

    path.join(ROUTES_FILENAME)
}
