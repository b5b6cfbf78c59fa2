//! Conversion from transport API DTOs to domain types.
//!
//! Provider data is untrusted: entries with unusable coordinates keep the
//! station but lose the coordinate, and unparseable times become `None`.
//! Only structural problems with a connection are reported as errors.

use chrono::{DateTime, FixedOffset, Utc};
use tracing::debug;

use crate::domain::{Coordinate, Departure, Route, RouteStop, Station};

use super::types::{
    CheckpointDto, ConnectionsResponse, CoordinateDto, JourneyDto, LocationDto,
    LocationsResponse, StationboardResponse,
};

/// Time format used by the API, e.g. "2024-05-06T12:07:00+0200".
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The connection has no section with a journey
    #[error("no route information available")]
    NoSections,

    /// The journey section lists no stops
    #[error("no stop information available")]
    NoStops,
}

/// Convert a wire coordinate, discarding anything incomplete or out of range.
pub fn convert_coordinate(dto: Option<&CoordinateDto>) -> Option<Coordinate> {
    let dto = dto?;
    let (lat, lon) = (dto.x?, dto.y?);
    Coordinate::new(lat, lon).ok()
}

/// Convert a location. Returns `None` for entries without a name.
pub fn convert_location(dto: &LocationDto) -> Option<Station> {
    let name = dto.name.as_deref().filter(|n| !n.is_empty())?;
    let coordinate = convert_coordinate(dto.coordinate.as_ref());
    if coordinate.is_none() {
        debug!(station = name, "station has no usable coordinate");
    }
    Some(Station::new(
        dto.id.clone().unwrap_or_default(),
        name,
        coordinate,
    ))
}

/// Convert a `/locations` response.
pub fn convert_locations(response: &LocationsResponse) -> Vec<Station> {
    response
        .stations
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .filter_map(convert_location)
        .collect()
}

/// Parse an API time, falling back to the unix timestamp.
pub fn parse_time(text: Option<&str>, timestamp: Option<i64>) -> Option<DateTime<FixedOffset>> {
    if let Some(parsed) = text.and_then(|t| DateTime::parse_from_str(t, TIME_FORMAT).ok()) {
        return Some(parsed);
    }
    let utc = DateTime::<Utc>::from_timestamp(timestamp?, 0)?;
    Some(utc.fixed_offset())
}

/// Convert a stationboard row.
pub fn convert_departure(journey: &JourneyDto) -> Departure {
    let stop = journey.stop.as_ref();
    Departure {
        number: journey.number.clone().filter(|n| !n.is_empty()),
        category: journey.category.clone().filter(|c| !c.is_empty()),
        destination: journey.to.clone(),
        departure_time: stop
            .and_then(|s| parse_time(s.departure.as_deref(), s.departure_timestamp)),
        platform: stop.and_then(|s| s.platform.clone()),
        delay_minutes: stop.and_then(|s| s.delay),
        operator: journey.operator.clone(),
    }
}

/// Convert a `/stationboard` response.
pub fn convert_stationboard(response: &StationboardResponse) -> Vec<Departure> {
    response
        .stationboard
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(convert_departure)
        .collect()
}

fn convert_stop(checkpoint: &CheckpointDto) -> Option<RouteStop> {
    let station = checkpoint.station.as_ref().and_then(convert_location)?;
    Some(RouteStop {
        station,
        arrival: parse_time(checkpoint.arrival.as_deref(), checkpoint.arrival_timestamp),
        departure: parse_time(
            checkpoint.departure.as_deref(),
            checkpoint.departure_timestamp,
        ),
    })
}

/// Convert a `/connections` response into the route of its first connection.
///
/// Returns `Ok(None)` when the provider found no connection at all.
pub fn convert_connection(response: &ConnectionsResponse) -> Result<Option<Route>, ConversionError> {
    let Some(connection) = response.connections.as_deref().and_then(|c| c.first()) else {
        return Ok(None);
    };

    let sections = connection.sections.as_deref().unwrap_or(&[]);
    if !sections.iter().any(|s| s.journey.is_some()) {
        return Err(ConversionError::NoSections);
    }

    // Walking sections and empty pass lists are skipped
    let section = sections
        .iter()
        .find(|s| {
            s.journey
                .as_ref()
                .and_then(|j| j.pass_list.as_deref())
                .is_some_and(|stops| !stops.is_empty())
        })
        .ok_or(ConversionError::NoStops)?;

    let stops: Vec<RouteStop> = section
        .journey
        .as_ref()
        .and_then(|j| j.pass_list.as_deref())
        .unwrap_or(&[])
        .iter()
        .filter_map(convert_stop)
        .collect();

    if stops.is_empty() {
        return Err(ConversionError::NoStops);
    }

    let departed = section
        .departure
        .as_ref()
        .and_then(|c| parse_time(c.departure.as_deref(), c.departure_timestamp));
    let arrived = section.arrival.as_ref().and_then(|c| {
        parse_time(c.arrival.as_deref(), c.arrival_timestamp)
            .or_else(|| parse_time(c.departure.as_deref(), c.departure_timestamp))
    });
    let duration_minutes = match (departed, arrived) {
        (Some(dep), Some(arr)) => Some((arr - dep).num_minutes()),
        _ => None,
    };

    Ok(Some(Route {
        stops,
        duration_minutes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(json: &str) -> LocationDto {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn coordinate_x_is_latitude() {
        let s = convert_location(&location(
            r#"{"id":"8503000","name":"Zürich HB","coordinate":{"type":"WGS84","x":47.378177,"y":8.540192}}"#,
        ))
        .unwrap();
        let c = s.coordinate.unwrap();
        assert_eq!(c.latitude(), 47.378177);
        assert_eq!(c.longitude(), 8.540192);
    }

    #[test]
    fn malformed_coordinates_become_absent() {
        for json in [
            r#"{"id":"1","name":"A"}"#,
            r#"{"id":"1","name":"A","coordinate":null}"#,
            r#"{"id":"1","name":"A","coordinate":{"type":"WGS84","x":null,"y":null}}"#,
            r#"{"id":"1","name":"A","coordinate":{"type":"WGS84","x":47.0}}"#,
            r#"{"id":"1","name":"A","coordinate":{"type":"WGS84","x":470.0,"y":8.0}}"#,
        ] {
            let s = convert_location(&location(json)).unwrap();
            assert!(s.coordinate.is_none(), "{json}");
        }
    }

    #[test]
    fn nameless_location_skipped() {
        assert!(convert_location(&location(r#"{"id":"1","name":null}"#)).is_none());
        assert!(convert_location(&location(r#"{"id":"1","name":""}"#)).is_none());
    }

    #[test]
    fn missing_id_is_empty() {
        let s = convert_location(&location(r#"{"name":"Somewhere"}"#)).unwrap();
        assert_eq!(s.id, "");
    }

    #[test]
    fn parse_time_prefers_text() {
        let t = parse_time(Some("2024-05-06T12:07:00+0200"), Some(0)).unwrap();
        assert_eq!(t.to_rfc3339(), "2024-05-06T12:07:00+02:00");
    }

    #[test]
    fn parse_time_falls_back_to_timestamp() {
        let t = parse_time(Some("garbage"), Some(1_714_990_020)).unwrap();
        assert_eq!(t.timestamp(), 1_714_990_020);
        assert!(parse_time(None, None).is_none());
    }

    #[test]
    fn stationboard_rows() {
        let json = r#"{
            "station": {"id": "8591123", "name": "Zürich, Bellevue"},
            "stationboard": [
                {
                    "stop": {"departure": "2024-05-06T12:07:00+0200", "platform": "D", "delay": 2},
                    "category": "T", "number": "4", "operator": "VBZ",
                    "to": "Zürich, Bahnhof Tiefenbrunnen"
                },
                {"category": "B", "number": "", "to": null}
            ]
        }"#;
        let resp: StationboardResponse = serde_json::from_str(json).unwrap();
        let rows = convert_stationboard(&resp);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line_label(), "4");
        assert_eq!(rows[0].platform.as_deref(), Some("D"));
        assert_eq!(rows[0].delay_minutes, Some(2));
        assert!(rows[0].departure_time.is_some());
        assert_eq!(rows[1].line_label(), "B");
        assert_eq!(rows[1].destination_or_unknown(), "Unknown");
    }

    #[test]
    fn empty_stationboard() {
        let resp: StationboardResponse = serde_json::from_str("{}").unwrap();
        assert!(convert_stationboard(&resp).is_empty());
    }

    #[test]
    fn connection_route() {
        let json = r#"{"connections": [{
            "sections": [{
                "journey": {"passList": [
                    {"station": {"id": "1", "name": "A", "coordinate": {"x": 47.0, "y": 8.0}},
                     "departure": "2024-05-06T12:00:00+0200"},
                    {"station": {"id": "2", "name": "B"}, "arrival": "2024-05-06T12:05:00+0200"},
                    {"station": {"id": "3", "name": "C"}, "arrival": "2024-05-06T12:12:00+0200"}
                ]},
                "departure": {"departure": "2024-05-06T12:00:00+0200"},
                "arrival": {"arrival": "2024-05-06T12:12:00+0200", "departure": null}
            }]
        }]}"#;
        let resp: ConnectionsResponse = serde_json::from_str(json).unwrap();
        let route = convert_connection(&resp).unwrap().unwrap();

        assert_eq!(route.stops.len(), 3);
        assert_eq!(route.duration_minutes, Some(12));
        assert!(route.stops[0].station.coordinate.is_some());
        assert!(route.stops[1].station.coordinate.is_none());
    }

    #[test]
    fn walk_sections_skipped() {
        let json = r#"{"connections": [{
            "sections": [
                {"journey": null, "walk": {"duration": 120}},
                {"journey": {"passList": [{"station": {"id": "1", "name": "A"}}]}}
            ]
        }]}"#;
        let resp: ConnectionsResponse = serde_json::from_str(json).unwrap();
        let route = convert_connection(&resp).unwrap().unwrap();
        assert_eq!(route.stops.len(), 1);
        assert_eq!(route.duration_minutes, None);
    }

    #[test]
    fn no_connections_is_none() {
        let resp: ConnectionsResponse = serde_json::from_str(r#"{"connections": []}"#).unwrap();
        assert_eq!(convert_connection(&resp), Ok(None));
    }

    #[test]
    fn connection_without_stops_is_error() {
        let json = r#"{"connections": [{"sections": [{"journey": {"passList": []}}]}]}"#;
        let resp: ConnectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(convert_connection(&resp), Err(ConversionError::NoStops));

        let json = r#"{"connections": [{"sections": []}]}"#;
        let resp: ConnectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(convert_connection(&resp), Err(ConversionError::NoSections));
    }

    #[test]
    fn connection_uses_first_section_with_stops() {
        let json = r#"{"connections": [{"sections": [
            {"walk": {"duration": 120}, "journey": null},
            {"journey": {"passList": []}},
            {"journey": {"passList": [
                {"station": {"id": "1", "name": "A"}, "departure": "2024-05-06T12:00:00+0200"},
                {"station": {"id": "2", "name": "B"}, "arrival": "2024-05-06T12:04:00+0200"}
            ]}}
        ]}]}"#;
        let resp: ConnectionsResponse = serde_json::from_str(json).unwrap();

        let route = convert_connection(&resp).unwrap().unwrap();

        let names: Vec<_> = route.stops.iter().map(|s| s.station.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
