//! Mock transit provider for running without network access.
//!
//! Loads recorded API responses from a directory and serves them as if
//! they were live:
//!
//! ```text
//! <dir>/locations.json           /locations response (all known stations)
//! <dir>/stationboards/<id>.json  /stationboard response per station id
//! <dir>/connections.json         /connections response holding every
//!                                recorded connection
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::domain::{Coordinate, Departure, Route, Station};

use super::convert::{convert_connection, convert_locations, convert_stationboard};
use super::error::TransportError;
use super::provider::TransitProvider;
use super::types::{CheckpointDto, ConnectionsResponse, LocationsResponse, StationboardResponse};

/// Transit provider that serves data from JSON files.
#[derive(Debug, Clone)]
pub struct MockTransitClient {
    stations: Arc<Vec<Station>>,
    boards: Arc<HashMap<String, StationboardResponse>>,
    connections: Arc<ConnectionsResponse>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, TransportError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| TransportError::MockData(format!("failed to read {:?}: {}", path, e)))?;
    serde_json::from_str(&json)
        .map_err(|e| TransportError::MockData(format!("failed to parse {:?}: {}", path, e)))
}

impl MockTransitClient {
    /// Load mock data from a directory.
    ///
    /// `locations.json` is required; stationboards and connections are
    /// optional and default to empty.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, TransportError> {
        let data_dir = data_dir.as_ref();

        let locations: LocationsResponse = read_json(&data_dir.join("locations.json"))?;
        let stations = convert_locations(&locations);

        let mut boards = HashMap::new();
        let boards_dir = data_dir.join("stationboards");
        if boards_dir.is_dir() {
            let entries = std::fs::read_dir(&boards_dir).map_err(|e| {
                TransportError::MockData(format!("failed to read {:?}: {}", boards_dir, e))
            })?;

            for entry in entries {
                let path = entry
                    .map_err(|e| TransportError::MockData(format!("bad directory entry: {}", e)))?
                    .path();
                if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                    continue;
                }
                let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let board: StationboardResponse = read_json(&path)?;
                boards.insert(id.to_string(), board);
            }
        }

        let connections_path = data_dir.join("connections.json");
        let connections = if connections_path.is_file() {
            read_json(&connections_path)?
        } else {
            ConnectionsResponse::default()
        };

        Ok(Self {
            stations: Arc::new(stations),
            boards: Arc::new(boards),
            connections: Arc::new(connections),
        })
    }

    /// Station ids that have a recorded stationboard.
    pub fn available_boards(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.boards.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Resolve an id or name to a recorded board.
    fn board_for(&self, station: &str) -> Option<&StationboardResponse> {
        if let Some(board) = self.boards.get(station) {
            return Some(board);
        }
        self.stations
            .iter()
            .find(|s| s.name == station)
            .and_then(|s| self.boards.get(&s.id))
    }
}

fn checkpoint_matches(checkpoint: Option<&CheckpointDto>, wanted: &str) -> bool {
    checkpoint
        .and_then(|c| c.station.as_ref())
        .is_some_and(|s| s.name.as_deref() == Some(wanted) || s.id.as_deref() == Some(wanted))
}

impl TransitProvider for MockTransitClient {
    async fn stations_near(&self, _origin: Coordinate) -> Result<Vec<Station>, TransportError> {
        // The live API returns a neighbourhood list; the mock returns
        // everything and leaves the filtering to the ranker.
        Ok(self.stations.as_ref().clone())
    }

    async fn search_stations(&self, query: &str) -> Result<Vec<Station>, TransportError> {
        let needle = query.to_lowercase();
        Ok(self
            .stations
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn stationboard(
        &self,
        station: &str,
        limit: u8,
    ) -> Result<Vec<Departure>, TransportError> {
        let board = self.board_for(station).ok_or_else(|| TransportError::Api {
            status: 404,
            message: format!(
                "No mock stationboard for {}. Available: {:?}",
                station,
                self.available_boards()
            ),
        })?;

        let mut departures = convert_stationboard(board);
        departures.truncate(limit as usize);
        Ok(departures)
    }

    async fn connection(&self, from: &str, to: &str) -> Result<Option<Route>, TransportError> {
        let matching = self
            .connections
            .connections
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .find(|c| checkpoint_matches(c.from.as_ref(), from) && checkpoint_matches(c.to.as_ref(), to))
            .cloned();

        let response = ConnectionsResponse {
            connections: Some(matching.into_iter().collect()),
        };
        Ok(convert_connection(&response)?)
    }
}
