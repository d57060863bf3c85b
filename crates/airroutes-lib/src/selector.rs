//! Route Selector: destinations reachable from a source and first-match
//! route resolution over an immutable route table.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use tracing::warn;

use crate::error::{Error, Result};
use crate::geo::FlightProfile;
use crate::loader::{Airport, AirportCode, Route};
use crate::output::RouteReport;

/// Maximum number of fuzzy suggestions attached to [`Error::UnknownAirport`].
const MAX_SUGGESTIONS: usize = 3;

/// Minimum similarity for a code or name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.5;

/// Destination attributes offered for a chosen source airport.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Destination {
    pub code: AirportCode,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<i32>,
}

impl From<&Airport> for Destination {
    fn from(airport: &Airport) -> Self {
        Self {
            code: airport.code.clone(),
            name: airport.name.clone(),
            timezone: airport.timezone,
        }
    }
}

/// A chosen (source, destination) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    pub source: AirportCode,
    pub destination: AirportCode,
}

impl Selection {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Immutable, in-memory route table with the airports it references.
///
/// The airport table is derived from route endpoints, so every route
/// references a known airport by construction.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    airports: BTreeMap<AirportCode, Airport>,
    by_source: HashMap<AirportCode, Vec<usize>>,
}

impl RouteTable {
    /// Build the table, indexing rows by source in input order.
    pub fn new(routes: Vec<Route>) -> Self {
        let mut airports: BTreeMap<AirportCode, Airport> = BTreeMap::new();
        let mut by_source: HashMap<AirportCode, Vec<usize>> = HashMap::new();

        for (index, route) in routes.iter().enumerate() {
            by_source
                .entry(route.source.code.clone())
                .or_default()
                .push(index);

            for airport in [&route.source, &route.destination] {
                match airports.get(&airport.code) {
                    Some(existing) => {
                        if let Some(field) = conflicting_field(existing, airport) {
                            warn!(
                                code = %airport.code,
                                field,
                                row = index,
                                "conflicting airport attributes; keeping first occurrence"
                            );
                        }
                    }
                    None => {
                        airports.insert(airport.code.clone(), airport.clone());
                    }
                }
            }
        }

        Self {
            routes,
            airports,
            by_source,
        }
    }

    /// All route rows in input order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// All airports referenced by at least one route, ordered by code.
    pub fn airports(&self) -> impl Iterator<Item = &Airport> {
        self.airports.values()
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Lookup an airport by its exact code.
    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airports.get(code)
    }

    /// Lookup an airport, failing with fuzzy suggestions when the code is unknown.
    pub fn require_airport(&self, code: &str) -> Result<&Airport> {
        self.airport(code).ok_or_else(|| Error::UnknownAirport {
            code: code.to_string(),
            suggestions: self.fuzzy_airport_matches(code, MAX_SUGGESTIONS),
        })
    }

    /// Distinct airports that appear as a route source, ordered by code.
    pub fn source_airports(&self) -> Vec<&Airport> {
        let mut codes: Vec<&AirportCode> = self.by_source.keys().collect();
        codes.sort();
        codes
            .into_iter()
            .filter_map(|code| self.airports.get(code))
            .collect()
    }

    /// Distinct destinations reachable from `source`.
    ///
    /// Attributes come from the airport table, so each code appears once.
    /// Unknown sources and sources without outgoing rows yield an empty set.
    pub fn valid_destinations(&self, source: &str) -> BTreeSet<Destination> {
        self.rows_from(source)
            .filter_map(|route| self.airports.get(&route.destination.code))
            .map(Destination::from)
            .collect()
    }

    /// First row, in input order, matching both `source` and `destination`.
    pub fn resolve_route(&self, source: &str, destination: &str) -> Result<&Route> {
        self.rows_from(source)
            .find(|route| route.destination.code == destination)
            .ok_or_else(|| Error::RouteNotFound {
                source_code: source.to_string(),
                destination: destination.to_string(),
            })
    }

    /// Resolve a selection and compute distance, duration and map bounds.
    ///
    /// Codes absent from the airport table fail with [`Error::UnknownAirport`];
    /// known codes without a connecting row fail with [`Error::RouteNotFound`].
    pub fn plan(&self, selection: &Selection, profile: &FlightProfile) -> Result<RouteReport> {
        self.require_airport(&selection.source)?;
        self.require_airport(&selection.destination)?;
        let route = self.resolve_route(&selection.source, &selection.destination)?;
        Ok(RouteReport::from_route(route, profile))
    }

    fn rows_from<'a>(&'a self, source: &str) -> impl Iterator<Item = &'a Route> + 'a {
        self.by_source
            .get(source)
            .into_iter()
            .flatten()
            .map(move |&index| &self.routes[index])
    }

    fn fuzzy_airport_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.to_ascii_uppercase();
        let mut scored: Vec<(f64, &str)> = self
            .airports
            .values()
            .filter_map(|airport| {
                let code_score = strsim::normalized_levenshtein(&needle, &airport.code);
                let name_score =
                    strsim::jaro_winkler(&needle, &airport.name.to_ascii_uppercase());
                let score = code_score.max(name_score);
                (score >= SUGGESTION_THRESHOLD).then_some((score, airport.code.as_str()))
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, code)| code.to_string())
            .collect()
    }
}

/// First attribute on which two rows describing the same airport disagree.
fn conflicting_field(kept: &Airport, other: &Airport) -> Option<&'static str> {
    if kept.name != other.name {
        Some("name")
    } else if kept.timezone != other.timezone {
        Some("timezone")
    } else if kept.country != other.country {
        Some("country")
    } else if !same_coordinate(kept.position.lat, other.position.lat)
        || !same_coordinate(kept.position.lon, other.position.lon)
    {
        Some("position")
    } else {
        None
    }
}

// Blank coordinates load as NaN and must not count as a disagreement.
fn same_coordinate(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;

    fn airport(code: &str, name: &str, lat: f64, lon: f64, tz: i32) -> Airport {
        Airport {
            code: code.to_string(),
            name: name.to_string(),
            position: GeoPoint::new(lat, lon),
            timezone: Some(tz),
            country: None,
        }
    }

    fn route(source: &Airport, destination: &Airport) -> Route {
        Route {
            source: source.clone(),
            destination: destination.clone(),
        }
    }

    fn table() -> RouteTable {
        let lhr = airport("LHR", "London Heathrow", 51.4706, -0.4619, 0);
        let jfk = airport("JFK", "John F Kennedy", 40.6398, -73.7789, -5);
        let cdg = airport("CDG", "Charles de Gaulle", 49.0128, 2.55, 1);
        RouteTable::new(vec![
            route(&lhr, &jfk),
            route(&lhr, &cdg),
            route(&lhr, &jfk),
            route(&jfk, &cdg),
        ])
    }

    #[test]
    fn destinations_are_distinct() {
        let destinations = table().valid_destinations("LHR");
        let codes: Vec<&str> = destinations.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["CDG", "JFK"]);
    }

    #[test]
    fn sink_airport_has_no_destinations() {
        assert!(table().valid_destinations("CDG").is_empty());
        assert!(table().valid_destinations("NOPE").is_empty());
    }

    #[test]
    fn unmatched_pair_is_not_found_even_when_codes_exist() {
        let error = table().resolve_route("CDG", "LHR").expect_err("no row");
        assert!(error.is_route_not_found());
    }

    #[test]
    fn duplicate_rows_resolve_to_first() {
        let table = table();
        let route = table.resolve_route("LHR", "JFK").expect("route exists");
        assert!(std::ptr::eq(route, &table.routes()[0]));
    }

    #[test]
    fn source_airports_are_sorted_and_distinct() {
        let table = table();
        let codes: Vec<&str> = table
            .source_airports()
            .into_iter()
            .map(|a| a.code.as_str())
            .collect();
        assert_eq!(codes, vec!["JFK", "LHR"]);
        assert_eq!(table.airport_count(), 3);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn first_airport_attributes_win() {
        let lhr = airport("LHR", "London Heathrow", 51.4706, -0.4619, 0);
        let renamed = airport("LHR", "Heathrow", 51.4706, -0.4619, 0);
        let jfk = airport("JFK", "John F Kennedy", 40.6398, -73.7789, -5);
        let table = RouteTable::new(vec![route(&lhr, &jfk), route(&jfk, &renamed)]);
        assert_eq!(
            table.airport("LHR").map(|a| a.name.as_str()),
            Some("London Heathrow")
        );
    }

    #[test]
    fn conflicting_timezones_yield_one_destination() {
        let lhr = airport("LHR", "London Heathrow", 51.4706, -0.4619, 0);
        let jfk = airport("JFK", "John F Kennedy", 40.6398, -73.7789, -5);
        let shifted = airport("JFK", "John F Kennedy", 40.6398, -73.7789, -4);
        let table = RouteTable::new(vec![route(&lhr, &jfk), route(&lhr, &shifted)]);

        let destinations: Vec<Destination> =
            table.valid_destinations("LHR").into_iter().collect();
        assert_eq!(destinations, vec![Destination::from(&jfk)]);
        assert_eq!(table.airport("JFK").and_then(|a| a.timezone), Some(-5));
    }

    #[test]
    fn conflicts_are_detected_on_every_attribute() {
        let base = airport("JFK", "John F Kennedy", 40.6398, -73.7789, -5);
        assert_eq!(conflicting_field(&base, &base.clone()), None);

        let mut other = base.clone();
        other.country = Some("United States".to_string());
        assert_eq!(conflicting_field(&base, &other), Some("country"));

        let mut other = base.clone();
        other.position = GeoPoint::new(40.0, -73.7789);
        assert_eq!(conflicting_field(&base, &other), Some("position"));

        let mut other = base.clone();
        other.timezone = None;
        assert_eq!(conflicting_field(&base, &other), Some("timezone"));

        let blank = airport("GKA", "Goroka", f64::NAN, f64::NAN, 10);
        assert_eq!(conflicting_field(&blank, &blank.clone()), None);
    }

    #[test]
    fn unknown_airport_suggests_close_codes() {
        let error = table().require_airport("lhr").expect_err("case differs");
        match error {
            Error::UnknownAirport { suggestions, .. } => {
                assert_eq!(suggestions.first().map(String::as_str), Some("LHR"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn plan_rejects_unknown_codes_before_resolving() {
        let selection = Selection::new("LHR", "XXX");
        let error = table()
            .plan(&selection, &FlightProfile::default())
            .expect_err("unknown destination");
        assert!(matches!(error, Error::UnknownAirport { .. }));
    }
}
