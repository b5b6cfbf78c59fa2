//! The lookup interface the rest of the crate depends on.

use std::future::Future;

use crate::domain::{Coordinate, Departure, Route, Station};

use super::error::TransportError;

/// Source of stations, stationboards and connections.
///
/// Implemented by the live HTTP client, the caching wrapper and the
/// file-backed mock. Station lists are raw provider output: coordinates
/// may be missing and nothing is filtered or sorted.
pub trait TransitProvider: Send + Sync {
    /// Stations around a position.
    fn stations_near(
        &self,
        origin: Coordinate,
    ) -> impl Future<Output = Result<Vec<Station>, TransportError>> + Send;

    /// Stations matching a free-text query, best match first.
    fn search_stations(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Station>, TransportError>> + Send;

    /// Upcoming departures at a station (id or name).
    fn stationboard(
        &self,
        station: &str,
        limit: u8,
    ) -> impl Future<Output = Result<Vec<Departure>, TransportError>> + Send;

    /// The route of one sample connection between two stations.
    ///
    /// Returns `Ok(None)` when the provider has no connection.
    fn connection(
        &self,
        from: &str,
        to: &str,
    ) -> impl Future<Output = Result<Option<Route>, TransportError>> + Send;
}
