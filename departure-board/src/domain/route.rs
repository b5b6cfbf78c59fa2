//! Sample route with intermediate stops.

use chrono::{DateTime, FixedOffset};

use super::Station;

/// One stop on a route's pass list.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStop {
    pub station: Station,
    pub arrival: Option<DateTime<FixedOffset>>,
    pub departure: Option<DateTime<FixedOffset>>,
}

/// The first journey section of a sample connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Every stop the vehicle passes, in order.
    pub stops: Vec<RouteStop>,
    /// Travel time in minutes, when both ends carry times.
    pub duration_minutes: Option<i64>,
}

impl Route {
    /// One-line summary, e.g. "7 stops • 12 min journey".
    pub fn description(&self) -> String {
        match self.duration_minutes {
            Some(mins) => format!("{} stops • {} min journey", self.stops.len(), mins),
            None => format!("{} stops", self.stops.len()),
        }
    }

    /// Whether a stop is the station the user is at.
    pub fn is_current_stop(stop: &RouteStop, current_station_name: &str) -> bool {
        stop.station.name == current_station_name
    }
}
