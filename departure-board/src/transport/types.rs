//! Transport API response DTOs.
//!
//! These types map directly to the `transport.opendata.ch/v1` JSON
//! responses. Nearly every field is optional: the API sends `null` or omits
//! fields freely, and a missing list means "nothing found".

use serde::{Deserialize, Serialize};

/// Response from `/locations`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LocationsResponse {
    #[serde(default)]
    pub stations: Option<Vec<LocationDto>>,
}

/// A location (station, address or point of interest).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationDto {
    /// Provider id. Null for addresses.
    pub id: Option<String>,

    pub name: Option<String>,

    pub coordinate: Option<CoordinateDto>,

    /// Distance from the query point, when searching by position.
    pub distance: Option<f64>,

    /// Icon hint ("train", "bus", "tram", ...).
    pub icon: Option<String>,
}

/// Wire coordinate. `x` is the latitude and `y` the longitude.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoordinateDto {
    /// Reference system, always "WGS84" in practice.
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub x: Option<f64>,

    pub y: Option<f64>,
}

/// Response from `/stationboard`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StationboardResponse {
    pub station: Option<LocationDto>,

    #[serde(default)]
    pub stationboard: Option<Vec<JourneyDto>>,
}

/// A vehicle journey, as a stationboard row or a connection section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyDto {
    /// The stop at the board station (stationboard rows only).
    pub stop: Option<CheckpointDto>,

    /// Full journey name, e.g. "T 4".
    pub name: Option<String>,

    pub category: Option<String>,

    pub subcategory: Option<String>,

    pub category_code: Option<i64>,

    /// Line number. The API sends strings, but older records use numbers.
    #[serde(default, deserialize_with = "string_or_number")]
    pub number: Option<String>,

    pub operator: Option<String>,

    /// Final destination name.
    pub to: Option<String>,

    /// Stops passed by this journey.
    pub pass_list: Option<Vec<CheckpointDto>>,
}

/// A station visit with times.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointDto {
    pub station: Option<LocationDto>,

    /// ISO 8601 with numeric offset, e.g. "2024-05-06T12:07:00+0200".
    pub arrival: Option<String>,

    pub arrival_timestamp: Option<i64>,

    pub departure: Option<String>,

    pub departure_timestamp: Option<i64>,

    /// Delay in minutes.
    pub delay: Option<i64>,

    pub platform: Option<String>,
}

/// Response from `/connections`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConnectionsResponse {
    #[serde(default)]
    pub connections: Option<Vec<ConnectionDto>>,
}

/// A door-to-door connection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionDto {
    pub from: Option<CheckpointDto>,

    pub to: Option<CheckpointDto>,

    /// Duration, e.g. "00d00:12:00".
    pub duration: Option<String>,

    pub sections: Option<Vec<SectionDto>>,
}

/// One leg of a connection: a ride or a walk.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SectionDto {
    pub journey: Option<JourneyDto>,

    pub departure: Option<CheckpointDto>,

    pub arrival: Option<CheckpointDto>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
