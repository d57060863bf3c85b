use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the airroutes library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset file could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the dataset")]
    ProjectDirsUnavailable,

    /// Raised when a dataset file lacks a column the loader requires.
    #[error("{file} is missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    /// Raised when an airport code could not be found in the dataset.
    #[error("unknown airport code: {code}{}", format_suggestions(.suggestions))]
    UnknownAirport {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when no route row matches the selected source and destination.
    #[error("no route found between {source_code} and {destination}")]
    RouteNotFound {
        source_code: String,
        destination: String,
    },

    /// Raised when a configuration value is out of range.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Raised when a coordinate pair could not be parsed.
    #[error("invalid coordinate '{input}': expected LAT,LON in decimal degrees")]
    InvalidCoordinate { input: String },

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for JSON (configuration) errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error is the non-fatal "no route" condition.
    pub fn is_route_not_found(&self) -> bool {
        matches!(self, Error::RouteNotFound { .. })
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
