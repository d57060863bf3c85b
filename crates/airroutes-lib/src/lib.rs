//! airroutes library entry points.
//!
//! This crate exposes helpers to locate the route dataset, load it into
//! memory, select routes between airports, and compute great-circle
//! distances and flight-time estimates. Higher-level consumers (the CLI, a
//! dashboard) should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod loader;
pub mod output;
pub mod selector;
pub mod stats;

pub use config::{load_config, AppConfig, ChartSettings, MapSettings};
pub use dataset::{default_data_dir, resolve_dataset, DatasetPaths};
pub use error::{Error, Result};
pub use geo::{
    distance, estimated_duration, FlightDuration, FlightProfile, GeoPoint, MapBounds,
    EARTH_RADIUS_KM,
};
pub use loader::{
    load_airlines, load_dataset, load_routes, Airline, Airport, AirportCode, Dataset, Route,
};
pub use output::{EndpointSummary, RouteReport};
pub use selector::{Destination, RouteTable, Selection};
pub use stats::{CountryCount, CountryStats, SummaryMetrics};
