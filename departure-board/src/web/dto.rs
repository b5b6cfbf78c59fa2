//! Data transfer objects for web requests and responses.
//!
//! The response types double as the data the HTML fragments render, so
//! every display string is computed once here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Departure, RankedStation, Route, Station, Urgency};
use crate::nearby::{distance, format_distance};

/// Request for stations around a position.
#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    /// Latitude in degrees
    pub lat: f64,

    /// Longitude in degrees
    pub lon: f64,

    /// Search radius in meters (defaults to the configured radius)
    pub radius: Option<f64>,
}

/// Request to search stations by name.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Free-text query
    pub q: String,
}

/// Request for a stationboard.
#[derive(Debug, Deserialize)]
pub struct DeparturesRequest {
    /// Station id or name
    pub station: String,

    /// Display name (defaults to `station`)
    pub name: Option<String>,

    /// Number of rows
    pub limit: Option<u8>,

    /// Distance to the station, when it was found by position
    pub distance: Option<f64>,
}

/// Request for the sample route of a departure.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Name of the station the user is at
    pub from: String,

    /// Destination of the departure
    pub to: String,

    /// Line label shown in the title
    pub line: Option<String>,

    /// User latitude, for per-stop distances
    pub lat: Option<f64>,

    /// User longitude, for per-stop distances
    pub lon: Option<f64>,
}

/// A station in search results.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Provider id
    pub id: String,

    /// Station name
    pub name: String,

    /// Latitude, when known
    pub latitude: Option<f64>,

    /// Longitude, when known
    pub longitude: Option<f64>,

    /// Distance from the search origin in meters
    pub distance_meters: Option<f64>,

    /// Distance for display, e.g. "250m away"
    pub distance_display: Option<String>,
}

/// Response listing stations.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    /// Matching stations, best first
    pub stations: Vec<StationResult>,
}

/// A row of a stationboard.
#[derive(Debug, Serialize)]
pub struct DepartureResult {
    /// Line badge text
    pub line: String,

    /// Provider category
    pub category: Option<String>,

    /// Destination (or "Unknown")
    pub destination: String,

    /// Scheduled departure (RFC 3339)
    pub departure_time: Option<String>,

    /// Whole minutes until departure, never negative
    pub minutes_until: Option<i64>,

    /// Platform or stand
    pub platform: Option<String>,

    /// Reported delay in minutes
    pub delay_minutes: Option<i64>,

    /// "tram", "bus", "train" or "default"
    pub transport_kind: String,

    /// "urgent", "soon" or empty
    pub urgency: String,
}

/// Response for a stationboard.
#[derive(Debug, Serialize)]
pub struct DeparturesResponse {
    /// Id or name the board was requested for
    pub station: String,

    /// Station display name
    pub name: String,

    /// Distance to the station, e.g. "250m away"
    pub distance_display: Option<String>,

    /// Upcoming departures
    pub departures: Vec<DepartureResult>,

    /// Local time the board was loaded, "HH:MM:SS"
    pub updated_at: String,
}

/// A stop on a route.
#[derive(Debug, Serialize)]
pub struct RouteStopResult {
    /// Station name
    pub name: String,

    /// Arrival time (RFC 3339)
    pub arrival: Option<String>,

    /// Departure time (RFC 3339)
    pub departure: Option<String>,

    /// Whether this is the station the user is at
    pub is_current: bool,

    /// Distance from the user in meters
    pub distance_meters: Option<f64>,

    /// Distance for display
    pub distance_display: Option<String>,
}

/// Response for a route lookup.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// e.g. "4 → Zürich, Bahnhof Tiefenbrunnen"
    pub title: String,

    /// e.g. "6 stops • 8 min journey"
    pub description: String,

    /// Travel time in minutes
    pub duration_minutes: Option<i64>,

    /// Every stop, in order
    pub stops: Vec<RouteStopResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl StationResult {
    /// Create from a station without distance.
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.clone(),
            name: station.name.clone(),
            latitude: station.coordinate.map(|c| c.latitude()),
            longitude: station.coordinate.map(|c| c.longitude()),
            distance_meters: None,
            distance_display: None,
        }
    }

    /// Create from a ranked station.
    pub fn from_ranked(ranked: &RankedStation) -> Self {
        Self {
            distance_meters: Some(ranked.distance_meters()),
            distance_display: Some(format_distance(ranked.distance_meters())),
            ..Self::from_station(ranked.station())
        }
    }

    /// Key to request this station's board with.
    pub fn query_key(&self) -> &str {
        if self.id.is_empty() { &self.name } else { &self.id }
    }
}

impl DepartureResult {
    /// Create from a domain departure, relative to `now`.
    pub fn from_departure(departure: &Departure, now: DateTime<Utc>) -> Self {
        let minutes_until = departure.minutes_until(now);
        let urgency = minutes_until
            .map(|m| Urgency::from_minutes(m).css_class())
            .unwrap_or_default();

        Self {
            line: departure.line_label().to_string(),
            category: departure.category.clone(),
            destination: departure.destination_or_unknown().to_string(),
            departure_time: departure.departure_time.map(|t| t.to_rfc3339()),
            minutes_until,
            platform: departure.platform.clone(),
            delay_minutes: departure.delay_minutes,
            transport_kind: departure.transport_kind().css_class().to_string(),
            urgency: urgency.to_string(),
        }
    }

    /// Minutes for display; "-" when the time is unknown.
    pub fn minutes_display(&self) -> String {
        self.minutes_until
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

impl RouteResponse {
    /// Create from a domain route.
    ///
    /// `current_station` marks the matching stop; `user_location` adds a
    /// distance to every other stop with a known coordinate.
    pub fn from_route(
        route: &Route,
        title: String,
        current_station: &str,
        user_location: Option<Coordinate>,
    ) -> Self {
        let stops = route
            .stops
            .iter()
            .map(|stop| {
                let is_current = Route::is_current_stop(stop, current_station);
                let distance_meters = match (user_location, stop.station.coordinate) {
                    (Some(user), Some(at)) if !is_current => Some(distance(user, at)),
                    _ => None,
                };

                RouteStopResult {
                    name: stop.station.name.clone(),
                    arrival: stop.arrival.map(|t| t.to_rfc3339()),
                    departure: stop.departure.map(|t| t.to_rfc3339()),
                    is_current,
                    distance_meters,
                    distance_display: distance_meters.map(format_distance),
                }
            })
            .collect();

        Self {
            title,
            description: route.description(),
            duration_minutes: route.duration_minutes,
            stops,
        }
    }
}
