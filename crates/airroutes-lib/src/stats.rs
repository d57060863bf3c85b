//! Per-country aggregates and headline metrics for the dataset.
//!
//! Routes are attributed to the country of their source airport. Rows or
//! airlines without a country are counted under [`UNKNOWN_COUNTRY`].

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::loader::{Airline, Dataset};
use crate::selector::RouteTable;

/// Bucket used for entries whose country is missing.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Number of entries attributed to one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
}

/// Headline numbers for the loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryMetrics {
    pub airports: usize,
    pub routes: usize,
    pub airlines: usize,
    /// Distinct airport countries.
    pub countries: usize,
}

/// All aggregates shown alongside the route view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryStats {
    pub summary: SummaryMetrics,
    pub airports: Vec<CountryCount>,
    pub routes: Vec<CountryCount>,
    pub airlines: Vec<CountryCount>,
}

impl CountryStats {
    /// Compute every aggregate, keeping the `top_n` largest countries per chart.
    pub fn compute(dataset: &Dataset, top_n: Option<usize>, active_airlines_only: bool) -> Self {
        let limit = |counts: Vec<CountryCount>| match top_n {
            Some(n) => top(counts, n),
            None => counts,
        };

        Self {
            summary: summary(dataset, active_airlines_only),
            airports: limit(airports_per_country(&dataset.routes)),
            routes: limit(routes_per_country(&dataset.routes)),
            airlines: limit(airlines_per_country(
                &dataset.airlines,
                active_airlines_only,
            )),
        }
    }
}

/// Distinct airports per country.
pub fn airports_per_country(table: &RouteTable) -> Vec<CountryCount> {
    tally(table.airports().map(|airport| airport.country.as_deref()))
}

/// Route rows per source-airport country.
pub fn routes_per_country(table: &RouteTable) -> Vec<CountryCount> {
    tally(
        table
            .routes()
            .iter()
            .map(|route| route.source.country.as_deref()),
    )
}

/// Airlines per registered country.
pub fn airlines_per_country(airlines: &[Airline], active_only: bool) -> Vec<CountryCount> {
    tally(
        airlines
            .iter()
            .filter(|airline| !active_only || airline.active)
            .map(|airline| airline.country.as_deref()),
    )
}

/// Headline metrics for the dataset.
pub fn summary(dataset: &Dataset, active_airlines_only: bool) -> SummaryMetrics {
    let countries: BTreeSet<&str> = dataset
        .routes
        .airports()
        .filter_map(|airport| airport.country.as_deref())
        .collect();
    let airlines = dataset
        .airlines
        .iter()
        .filter(|airline| !active_airlines_only || airline.active)
        .count();

    SummaryMetrics {
        airports: dataset.routes.airport_count(),
        routes: dataset.routes.len(),
        airlines,
        countries: countries.len(),
    }
}

/// Keep the `n` largest entries of an already sorted tally.
pub fn top(mut counts: Vec<CountryCount>, n: usize) -> Vec<CountryCount> {
    counts.truncate(n);
    counts
}

// Sorted by count descending, then country name ascending.
fn tally<'a>(countries: impl Iterator<Item = Option<&'a str>>) -> Vec<CountryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for country in countries {
        *counts.entry(country.unwrap_or(UNKNOWN_COUNTRY)).or_default() += 1;
    }

    let mut counts: Vec<CountryCount> = counts
        .into_iter()
        .map(|(country, count)| CountryCount {
            country: country.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.country.cmp(&b.country)));
    counts
}
