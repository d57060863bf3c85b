mod common;

use airroutes_lib::stats::{airlines_per_country, routes_per_country, UNKNOWN_COUNTRY};
use airroutes_lib::{CountryStats, SummaryMetrics};

use common::fixture_dataset;

#[test]
fn summary_metrics_match_fixture() {
    let stats = CountryStats::compute(&fixture_dataset(), None, false);
    assert_eq!(
        stats.summary,
        SummaryMetrics {
            airports: 8,
            routes: 10,
            airlines: 9,
            countries: 6,
        }
    );
}

#[test]
fn heathrow_dominates_route_counts() {
    let counts = routes_per_country(&fixture_dataset().routes);
    assert_eq!(counts[0].country, "United Kingdom");
    assert_eq!(counts[0].count, 4);
    assert_eq!(counts[1].country, "United States");
    assert_eq!(counts[1].count, 2);
    assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), 10);
}

#[test]
fn airport_chart_is_truncated_to_top_n() {
    let stats = CountryStats::compute(&fixture_dataset(), Some(2), false);
    let countries: Vec<&str> = stats.airports.iter().map(|c| c.country.as_str()).collect();
    assert_eq!(countries, vec!["Papua New Guinea", "United States"]);
}

#[test]
fn airlines_without_country_are_bucketed() {
    let dataset = fixture_dataset();
    let counts = airlines_per_country(&dataset.airlines, false);
    assert!(counts
        .iter()
        .any(|c| c.country == UNKNOWN_COUNTRY && c.count == 1));

    let us_all = counts
        .iter()
        .find(|c| c.country == "United States")
        .map(|c| c.count);
    assert_eq!(us_all, Some(2));

    let active = airlines_per_country(&dataset.airlines, true);
    let us_active = active
        .iter()
        .find(|c| c.country == "United States")
        .map(|c| c.count);
    assert_eq!(us_active, Some(1));
}
