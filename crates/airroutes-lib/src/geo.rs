//! Great-circle distance and flight-time estimation.
//!
//! Coordinates are plain decimal degrees. Nothing here validates ranges:
//! latitude outside `[-90, 90]`, longitude outside `[-180, 180]` or NaN
//! input produce whatever the arithmetic yields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mean Earth radius used by [`distance`], in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default cruise speed for [`FlightProfile`], in km/h.
pub const DEFAULT_CRUISE_SPEED_KMH: f64 = 850.0;

/// Default overhead multiplier for [`FlightProfile`].
///
/// Dataset dashboards have used anything between 1.1 and 1.6; 1.1 accounts
/// for taxi, climb and descent on a typical medium-haul sector.
pub const DEFAULT_OVERHEAD_FACTOR: f64 = 1.1;

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.lat, self.lon)
    }
}

impl FromStr for GeoPoint {
    type Err = Error;

    /// Parse `LAT,LON` (whitespace around either value is ignored).
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidCoordinate {
            input: s.to_string(),
        };
        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        let lat = lat.trim().parse::<f64>().map_err(|_| invalid())?;
        let lon = lon.trim().parse::<f64>().map_err(|_| invalid())?;
        Ok(Self { lat, lon })
    }
}

/// Haversine great-circle distance between two points, in kilometres.
pub fn distance(p1: GeoPoint, p2: GeoPoint) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = p2.lon.to_radians() - p1.lon.to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    c * EARTH_RADIUS_KM
}

/// Whole hours and remaining minutes of an estimated flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlightDuration {
    pub hours: u64,
    pub minutes: u64,
}

impl fmt::Display for FlightDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {:02}m", self.hours, self.minutes)
    }
}

/// Estimate flight time for `km` at `cruise_speed_kmh`, scaled by
/// `overhead_factor`.
///
/// The total is truncated to whole seconds before being split into hours
/// and minutes, so partial minutes are dropped rather than rounded.
/// Negative or NaN results saturate to zero.
pub fn estimated_duration(km: f64, cruise_speed_kmh: f64, overhead_factor: f64) -> FlightDuration {
    let total_seconds = ((km / cruise_speed_kmh) * 3600.0 * overhead_factor) as u64;
    FlightDuration {
        hours: total_seconds / 3600,
        minutes: (total_seconds % 3600) / 60,
    }
}

/// Aircraft performance assumptions used for flight-time estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightProfile {
    pub cruise_speed_kmh: f64,
    pub overhead_factor: f64,
}

impl Default for FlightProfile {
    fn default() -> Self {
        Self {
            cruise_speed_kmh: DEFAULT_CRUISE_SPEED_KMH,
            overhead_factor: DEFAULT_OVERHEAD_FACTOR,
        }
    }
}

impl FlightProfile {
    pub fn estimate(&self, km: f64) -> FlightDuration {
        estimated_duration(km, self.cruise_speed_kmh, self.overhead_factor)
    }

    /// Reject profiles that would divide by zero or shrink flight time.
    pub fn validate(&self) -> Result<()> {
        if !(self.cruise_speed_kmh.is_finite() && self.cruise_speed_kmh > 0.0) {
            return Err(Error::InvalidConfig {
                message: format!(
                    "cruise speed must be a positive number of km/h, got {}",
                    self.cruise_speed_kmh
                ),
            });
        }
        if !(self.overhead_factor.is_finite() && self.overhead_factor > 0.0) {
            return Err(Error::InvalidConfig {
                message: format!(
                    "overhead factor must be positive, got {}",
                    self.overhead_factor
                ),
            });
        }
        Ok(())
    }
}

/// Rectangle that a map viewport should be fitted to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl MapBounds {
    /// Smallest latitude/longitude box containing both points.
    pub fn enclosing(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            south_west: GeoPoint::new(a.lat.min(b.lat), a.lon.min(b.lon)),
            north_east: GeoPoint::new(a.lat.max(b.lat), a.lon.max(b.lon)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: GeoPoint = GeoPoint::new(51.5074, -0.1278);
    const NEW_YORK: GeoPoint = GeoPoint::new(40.7128, -74.0060);

    #[test]
    fn identical_points_are_zero_apart() {
        assert_eq!(distance(LONDON, LONDON), 0.0);
        assert_eq!(distance(NEW_YORK, NEW_YORK), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(distance(LONDON, NEW_YORK), distance(NEW_YORK, LONDON));
    }

    #[test]
    fn london_to_new_york() {
        let km = distance(LONDON, NEW_YORK);
        assert!((km - 5570.0).abs() <= 5.0, "got {km}");
    }

    #[test]
    fn antipodal_points_span_half_the_circumference() {
        let km = distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((km - half).abs() < 1e-6);
    }

    #[test]
    fn nan_input_propagates() {
        assert!(distance(GeoPoint::new(f64::NAN, 0.0), LONDON).is_nan());
    }

    #[test]
    fn one_hour_at_cruise_speed() {
        assert_eq!(
            estimated_duration(850.0, 850.0, 1.0),
            FlightDuration {
                hours: 1,
                minutes: 0
            }
        );
    }

    #[test]
    fn overhead_factor_scales_duration() {
        // 850 km at 850 km/h * 1.5 = 90 minutes
        let duration = estimated_duration(850.0, 850.0, 1.5);
        assert_eq!(duration.hours, 1);
        assert_eq!(duration.minutes, 30);
        assert_eq!(duration.to_string(), "1h 30m");
    }

    #[test]
    fn partial_minutes_are_truncated() {
        // 100 km at 850 km/h = 423.5 seconds -> 7 minutes
        let duration = estimated_duration(100.0, 850.0, 1.0);
        assert_eq!(duration.hours, 0);
        assert_eq!(duration.minutes, 7);
    }

    #[test]
    fn default_profile_is_documented_values() {
        let profile = FlightProfile::default();
        assert_eq!(profile.cruise_speed_kmh, 850.0);
        assert_eq!(profile.overhead_factor, 1.1);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn zero_cruise_speed_is_rejected() {
        let profile = FlightProfile {
            cruise_speed_kmh: 0.0,
            ..FlightProfile::default()
        };
        let error = profile.validate().expect_err("invalid profile");
        assert!(error.to_string().contains("cruise speed"));
    }

    #[test]
    fn parses_coordinate_pairs() {
        let point: GeoPoint = " 51.5074, -0.1278 ".parse().expect("valid");
        assert_eq!(point, LONDON);
        assert!("51.5".parse::<GeoPoint>().is_err());
        assert!("north,west".parse::<GeoPoint>().is_err());
    }

    #[test]
    fn bounds_enclose_both_points() {
        let bounds = MapBounds::enclosing(LONDON, NEW_YORK);
        assert_eq!(bounds.south_west, GeoPoint::new(40.7128, -74.0060));
        assert_eq!(bounds.north_east, GeoPoint::new(51.5074, -0.1278));
    }
}
