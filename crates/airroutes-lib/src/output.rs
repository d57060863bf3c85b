use serde::Serialize;

use crate::geo::{FlightDuration, FlightProfile, GeoPoint, MapBounds};
use crate::loader::{Airport, AirportCode, Route};

/// Endpoint of a resolved route, as handed to a rendering surface.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EndpointSummary {
    pub code: AirportCode,
    pub name: String,
    pub position: GeoPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl EndpointSummary {
    /// Timezone rendered as `GMT+5`, `GMT-3` or `GMT`.
    pub fn timezone_label(&self) -> Option<String> {
        self.timezone.map(|offset| match offset {
            0 => "GMT".to_string(),
            o if o > 0 => format!("GMT+{o}"),
            o => format!("GMT{o}"),
        })
    }
}

impl From<&Airport> for EndpointSummary {
    fn from(airport: &Airport) -> Self {
        Self {
            code: airport.code.clone(),
            name: airport.name.clone(),
            position: airport.position,
            timezone: airport.timezone,
            country: airport.country.clone(),
        }
    }
}

/// Structured result of a route selection that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteReport {
    pub source: EndpointSummary,
    pub destination: EndpointSummary,
    pub distance_km: f64,
    pub duration: FlightDuration,
    pub profile: FlightProfile,
    /// Destination offset minus source offset, when both are known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_difference_hours: Option<i32>,
    pub bounds: MapBounds,
}

impl RouteReport {
    pub fn from_route(route: &Route, profile: &FlightProfile) -> Self {
        let distance_km = route.distance_km();
        let timezone_difference_hours = match (route.source.timezone, route.destination.timezone) {
            (Some(from), Some(to)) => Some(to - from),
            _ => None,
        };

        Self {
            source: EndpointSummary::from(&route.source),
            destination: EndpointSummary::from(&route.destination),
            distance_km,
            duration: profile.estimate(distance_km),
            profile: *profile,
            timezone_difference_hours,
            bounds: MapBounds::enclosing(route.source.position, route.destination.position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airport(code: &str, lat: f64, lon: f64, timezone: Option<i32>) -> Airport {
        Airport {
            code: code.to_string(),
            name: format!("{code} International"),
            position: GeoPoint::new(lat, lon),
            timezone,
            country: None,
        }
    }

    #[test]
    fn report_carries_distance_duration_and_offsets() {
        let route = Route {
            source: airport("LHR", 51.5074, -0.1278, Some(0)),
            destination: airport("JFK", 40.7128, -74.0060, Some(-5)),
        };
        let report = RouteReport::from_route(&route, &FlightProfile::default());

        assert!((report.distance_km - 5570.0).abs() <= 5.0);
        assert_eq!(report.timezone_difference_hours, Some(-5));
        assert_eq!(report.duration, FlightProfile::default().estimate(report.distance_km));
        assert_eq!(report.destination.timezone_label().as_deref(), Some("GMT-5"));
        assert_eq!(report.source.timezone_label().as_deref(), Some("GMT"));
    }

    #[test]
    fn missing_timezones_are_omitted() {
        let route = Route {
            source: airport("AAA", 0.0, 0.0, None),
            destination: airport("BBB", 0.0, 1.0, Some(3)),
        };
        let report = RouteReport::from_route(&route, &FlightProfile::default());
        assert_eq!(report.timezone_difference_hours, None);
        assert_eq!(report.source.timezone_label(), None);

        let json = serde_json::to_value(&report).expect("serialises");
        assert!(json.get("timezone_difference_hours").is_none());
        assert_eq!(json["destination"]["timezone"], 3);
    }
}
