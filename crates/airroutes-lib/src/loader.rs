//! Loading of the merged routes table and the airlines table.
//!
//! The routes table carries both endpoints' airport attributes on every row
//! (`*_x` columns describe the source, `*_y` the destination). The airlines
//! table follows the headerless OpenFlights `airlines.dat` layout.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::dataset::DatasetPaths;
use crate::error::{Error, Result};
use crate::geo::{self, GeoPoint};
use crate::selector::RouteTable;

/// Airport identifier as it appears in the routes table (IATA or ICAO).
pub type AirportCode = String;

/// OpenFlights marker for a missing value.
const NULL_MARKER: &str = "\\N";

const REQUIRED_ROUTE_COLUMNS: &[&str] = &[
    "Source airport",
    "Destination airport",
    "Name_x",
    "Name_y",
    "Latitude_x",
    "Longitude_x",
    "Latitude_y",
    "Longitude_y",
];

/// Airport attributes joined onto a route row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    pub code: AirportCode,
    pub name: String,
    pub position: GeoPoint,
    /// Whole hours from GMT, when the dataset carries timezone columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Directed source to destination pair with both endpoints denormalised.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub source: Airport,
    pub destination: Airport,
}

impl Route {
    /// Great-circle length of the route in kilometres.
    pub fn distance_km(&self) -> f64 {
        geo::distance(self.source.position, self.destination.position)
    }
}

/// One entry of the airlines table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airline {
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "nullable_string")]
    pub alias: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub iata: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub icao: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub callsign: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub country: Option<String>,
    #[serde(deserialize_with = "active_flag")]
    pub active: bool,
}

/// Everything the selector and aggregates need, loaded once per process.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub routes: RouteTable,
    pub airlines: Vec<Airline>,
}

#[derive(Debug, Deserialize)]
struct RouteRow {
    #[serde(rename = "Source airport")]
    source: String,
    #[serde(rename = "Destination airport")]
    destination: String,
    #[serde(rename = "Name_x")]
    source_name: String,
    #[serde(rename = "Name_y")]
    destination_name: String,
    #[serde(rename = "Latitude_x", deserialize_with = "lenient_f64")]
    source_lat: f64,
    #[serde(rename = "Longitude_x", deserialize_with = "lenient_f64")]
    source_lon: f64,
    #[serde(rename = "Latitude_y", deserialize_with = "lenient_f64")]
    destination_lat: f64,
    #[serde(rename = "Longitude_y", deserialize_with = "lenient_f64")]
    destination_lon: f64,
    #[serde(rename = "Timezone_x", default, deserialize_with = "hour_offset")]
    source_timezone: Option<i32>,
    #[serde(rename = "Timezone_y", default, deserialize_with = "hour_offset")]
    destination_timezone: Option<i32>,
    #[serde(rename = "Country_x", default, deserialize_with = "nullable_string")]
    source_country: Option<String>,
    #[serde(rename = "Country_y", default, deserialize_with = "nullable_string")]
    destination_country: Option<String>,
}

impl From<RouteRow> for Route {
    fn from(row: RouteRow) -> Self {
        Route {
            source: Airport {
                code: row.source,
                name: row.source_name,
                position: GeoPoint::new(row.source_lat, row.source_lon),
                timezone: row.source_timezone,
                country: row.source_country,
            },
            destination: Airport {
                code: row.destination,
                name: row.destination_name,
                position: GeoPoint::new(row.destination_lat, row.destination_lon),
                timezone: row.destination_timezone,
                country: row.destination_country,
            },
        }
    }
}

/// Load the routes and (optional) airlines tables into memory.
pub fn load_dataset(paths: &DatasetPaths) -> Result<Dataset> {
    let routes = load_routes(&paths.routes)?;
    let airlines = match &paths.airlines {
        Some(path) => load_airlines(path)?,
        None => {
            debug!("no airlines table found; airline aggregates will be empty");
            Vec::new()
        }
    };

    Ok(Dataset {
        routes: RouteTable::new(routes),
        airlines,
    })
}

/// Load the merged routes table from a file path.
pub fn load_routes(path: &Path) -> Result<Vec<Route>> {
    let file = fs::File::open(path)?;
    let routes = read_routes(file)?;
    debug!(path = %path.display(), routes = routes.len(), "loaded routes table");
    Ok(routes)
}

/// Parse the merged routes table from a reader, preserving row order.
pub fn read_routes<R: Read>(reader: R) -> Result<Vec<Route>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_ROUTE_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(Error::MissingColumn {
                file: "routes table".to_string(),
                column: (*column).to_string(),
            });
        }
    }

    let mut routes = Vec::new();
    for record in csv_reader.deserialize::<RouteRow>() {
        routes.push(Route::from(record?));
    }
    Ok(routes)
}

/// Load the airlines table from a file path.
pub fn load_airlines(path: &Path) -> Result<Vec<Airline>> {
    let file = fs::File::open(path)?;
    let airlines = read_airlines(file)?;
    debug!(path = %path.display(), airlines = airlines.len(), "loaded airlines table");
    Ok(airlines)
}

/// Parse a headerless OpenFlights airlines table from a reader.
pub fn read_airlines<R: Read>(reader: R) -> Result<Vec<Airline>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(reader);

    let mut airlines = Vec::new();
    for record in csv_reader.deserialize::<Airline>() {
        airlines.push(record?);
    }
    Ok(airlines)
}

fn nullable_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty() && s != NULL_MARKER))
}

fn active_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(matches!(value.as_deref(), Some("Y") | Some("y")))
}

// Coordinates are not validated: blanks and garbage become NaN and flow
// through the distance arithmetic.
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(f64::NAN))
}

// Timezone offsets arrive as floats after the dataset merge ("-5.0", "5.5");
// fractional offsets are truncated toward zero.
fn hour_offset<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = nullable_string(deserializer)?;
    Ok(value
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i32))
}
