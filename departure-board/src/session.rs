//! Per-user viewing state.
//!
//! A `Session` holds everything one viewer has chosen so far: where they
//! are, how far to search, which station they are watching and the board
//! last loaded for it. It is owned by the caller and passed explicitly to
//! whatever needs it; nothing here is global.

use std::time::Duration;

use tracing::{info, warn};

use crate::domain::{Coordinate, CurrentStation, Departure, RankedStation, Route};
use crate::nearby::find_nearby;
use crate::refresh::{self, RefreshHandle};
use crate::transport::{TransitProvider, TransportError};

/// Errors from session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No station has been selected yet
    #[error("no station selected")]
    NoStationSelected,

    /// The user location is unknown
    #[error("location not available")]
    NoLocation,

    /// A list index did not refer to an entry
    #[error("invalid selection: {0}")]
    InvalidSelection(usize),

    /// Search radius must be a positive, finite number of meters
    #[error("invalid search radius: {0}")]
    InvalidRadius(f64),

    /// The provider has no route for the departure
    #[error("no route information available")]
    NoRoute,

    /// The provider request failed
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// State of one viewer.
#[derive(Debug)]
pub struct Session {
    user_location: Option<Coordinate>,
    search_radius: f64,
    nearby: Vec<RankedStation>,
    current: Option<CurrentStation>,
    departures: Vec<Departure>,
    refresh: Option<RefreshHandle>,
}

impl Session {
    /// Create an empty session with the given search radius.
    pub fn new(search_radius: f64) -> Result<Self, SessionError> {
        let mut session = Self {
            user_location: None,
            search_radius: 0.0,
            nearby: Vec::new(),
            current: None,
            departures: Vec::new(),
            refresh: None,
        };
        session.set_radius(search_radius)?;
        Ok(session)
    }

    /// Record the user's position.
    pub fn locate(&mut self, location: Coordinate) {
        self.user_location = Some(location);
    }

    /// Change the search radius used by `search_nearby`.
    pub fn set_radius(&mut self, meters: f64) -> Result<(), SessionError> {
        if !meters.is_finite() || meters <= 0.0 {
            return Err(SessionError::InvalidRadius(meters));
        }
        self.search_radius = meters;
        Ok(())
    }

    pub fn radius(&self) -> f64 {
        self.search_radius
    }

    /// Look up stations around the user's position.
    ///
    /// The result replaces the nearby list; an empty list means nothing
    /// is inside the radius and the caller may retry with a larger one.
    pub async fn search_nearby<P: TransitProvider>(
        &mut self,
        provider: &P,
    ) -> Result<&[RankedStation], SessionError> {
        let origin = self.user_location.ok_or(SessionError::NoLocation)?;
        let stations = find_nearby(provider, origin, self.search_radius).await?;
        info!(
            found = stations.len(),
            radius_meters = self.search_radius,
            "nearby stations"
        );
        self.show_nearby(stations);
        Ok(&self.nearby)
    }

    /// Replace the list of stations offered for selection.
    pub fn show_nearby(&mut self, stations: Vec<RankedStation>) {
        self.nearby = stations;
    }

    pub fn nearby(&self) -> &[RankedStation] {
        &self.nearby
    }

    /// Pick a station from the nearby list by position.
    pub fn select_nearby(&mut self, index: usize) -> Result<&CurrentStation, SessionError> {
        let ranked = self
            .nearby
            .get(index)
            .cloned()
            .ok_or(SessionError::InvalidSelection(index))?;
        Ok(self.select(ranked.into()))
    }

    /// Make a station current. Its previous board is discarded.
    pub fn select(&mut self, station: CurrentStation) -> &CurrentStation {
        info!(station = %station.station.name, "selected station");
        self.departures.clear();
        self.current.insert(station)
    }

    pub fn current(&self) -> Option<&CurrentStation> {
        self.current.as_ref()
    }

    /// Fetch the board for the current station.
    ///
    /// On failure the previous board is kept.
    pub async fn load_departures<P: TransitProvider>(
        &mut self,
        provider: &P,
        limit: u8,
    ) -> Result<&[Departure], SessionError> {
        let current = self.current.as_ref().ok_or(SessionError::NoStationSelected)?;
        let departures = provider
            .stationboard(current.station.query_key(), limit)
            .await
            .inspect_err(|e| {
                warn!(station = %current.station.name, error = %e, "failed to load departures")
            })?;
        self.departures = departures;
        Ok(&self.departures)
    }

    pub fn departures(&self) -> &[Departure] {
        &self.departures
    }

    /// A row of the last loaded board.
    pub fn departure(&self, index: usize) -> Result<&Departure, SessionError> {
        self.departures
            .get(index)
            .ok_or(SessionError::InvalidSelection(index))
    }

    /// Fetch a sample route for a row of the board.
    pub async fn route_for<P: TransitProvider>(
        &self,
        provider: &P,
        index: usize,
    ) -> Result<Route, SessionError> {
        let current = self.current.as_ref().ok_or(SessionError::NoStationSelected)?;
        let departure = self.departure(index)?;
        let destination = departure.destination.as_deref().ok_or(SessionError::NoRoute)?;

        provider
            .connection(&current.station.name, destination)
            .await?
            .ok_or(SessionError::NoRoute)
    }

    /// Start reloading the board every `period`, replacing any running timer.
    pub fn start_auto_refresh(&mut self, period: Duration) {
        self.stop_auto_refresh();
        self.refresh = Some(refresh::start(period));
    }

    /// Stop the refresh timer, if any.
    pub fn stop_auto_refresh(&mut self) {
        if let Some(mut handle) = self.refresh.take() {
            handle.cancel();
        }
    }

    pub fn is_auto_refreshing(&self) -> bool {
        self.refresh.as_ref().is_some_and(|h| !h.is_cancelled())
    }

    /// Wait for the next refresh tick.
    ///
    /// Returns `None` immediately when no timer is running.
    pub async fn next_refresh(&mut self) -> Option<u64> {
        match self.refresh.as_mut() {
            Some(handle) => handle.tick().await,
            None => None,
        }
    }

    /// Leave the current station: stop refreshing and forget its board.
    pub fn change_station(&mut self) {
        self.stop_auto_refresh();
        self.current = None;
        self.departures.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Station;
    use crate::transport::MockTransitClient;

    fn mock() -> MockTransitClient {
        MockTransitClient::new("data/mock").unwrap()
    }

    fn bellevue() -> Coordinate {
        Coordinate::new(47.3668, 8.5451).unwrap()
    }

    #[test]
    fn rejects_bad_radius() {
        assert!(matches!(
            Session::new(0.0),
            Err(SessionError::InvalidRadius(_))
        ));
        let mut session = Session::new(500.0).unwrap();
        assert!(session.set_radius(f64::NAN).is_err());
        assert_eq!(session.radius(), 500.0);
    }

    #[tokio::test]
    async fn nearby_requires_location() {
        let mut session = Session::new(1000.0).unwrap();
        let result = session.search_nearby(&mock()).await;
        assert!(matches!(result, Err(SessionError::NoLocation)));
    }

    #[tokio::test]
    async fn nearby_then_select_then_load() {
        let provider = mock();
        let mut session = Session::new(1000.0).unwrap();
        session.locate(bellevue());

        let nearby = session.search_nearby(&provider).await.unwrap();
        assert_eq!(nearby[0].station().name, "Zürich, Bellevue");

        let current = session.select_nearby(0).unwrap();
        assert!(current.distance_meters.is_some());

        let rows = session.load_departures(&provider, 6).await.unwrap();
        assert_eq!(rows.len(), 5);
    }

    #[tokio::test]
    async fn larger_radius_finds_more() {
        let provider = mock();
        let mut session = Session::new(300.0).unwrap();
        session.locate(bellevue());
        let small = session.search_nearby(&provider).await.unwrap().len();

        session.set_radius(2000.0).unwrap();
        let large = session.search_nearby(&provider).await.unwrap().len();

        assert!(large > small);
    }

    #[test]
    fn invalid_nearby_index() {
        let mut session = Session::new(1000.0).unwrap();
        assert!(matches!(
            session.select_nearby(3),
            Err(SessionError::InvalidSelection(3))
        ));
    }

    #[tokio::test]
    async fn load_without_station_fails() {
        let mut session = Session::new(1000.0).unwrap();
        let result = session.load_departures(&mock(), 6).await;
        assert!(matches!(result, Err(SessionError::NoStationSelected)));
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_board() {
        let provider = mock();
        let mut session = Session::new(1000.0).unwrap();
        session.select(CurrentStation::unranked(Station::new(
            "8591123",
            "Zürich, Bellevue",
            None,
        )));
        session.load_departures(&provider, 6).await.unwrap();

        // Point the session at a station without mock data, but keep rows
        session.current = Some(CurrentStation::unranked(Station::new("0", "Nowhere", None)));
        assert!(session.load_departures(&provider, 6).await.is_err());
        assert_eq!(session.departures().len(), 5);
    }

    #[tokio::test]
    async fn route_for_departure() {
        let provider = mock();
        let mut session = Session::new(1000.0).unwrap();
        session.select(CurrentStation::unranked(Station::new(
            "8591123",
            "Zürich, Bellevue",
            None,
        )));
        session.load_departures(&provider, 6).await.unwrap();

        // Row 0 is tram 4 to Tiefenbrunnen
        let route = session.route_for(&provider, 0).await.unwrap();
        assert_eq!(route.stops.len(), 6);
        assert_eq!(route.duration_minutes, Some(8));

        // Row 1 has no recorded connection
        assert!(matches!(
            session.route_for(&provider, 1).await,
            Err(SessionError::NoRoute)
        ));
        assert!(matches!(
            session.route_for(&provider, 99).await,
            Err(SessionError::InvalidSelection(99))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn auto_refresh_lifecycle() {
        let mut session = Session::new(1000.0).unwrap();
        assert!(!session.is_auto_refreshing());
        assert_eq!(session.next_refresh().await, None);

        session.start_auto_refresh(Duration::from_secs(60));
        assert!(session.is_auto_refreshing());
        assert_eq!(session.next_refresh().await, Some(1));

        // Restarting replaces the timer, so numbering starts over
        session.start_auto_refresh(Duration::from_secs(60));
        assert_eq!(session.next_refresh().await, Some(1));

        session.stop_auto_refresh();
        assert!(!session.is_auto_refreshing());
        assert_eq!(session.next_refresh().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_refresh_period_still_ticks() {
        let mut session = Session::new(1000.0).unwrap();
        session.start_auto_refresh(Duration::ZERO);

        assert!(session.is_auto_refreshing());
        assert_eq!(session.next_refresh().await, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn change_station_resets() {
        let provider = mock();
        let mut session = Session::new(1000.0).unwrap();
        session.select(CurrentStation::unranked(Station::new(
            "8591123",
            "Zürich, Bellevue",
            None,
        )));
        session.load_departures(&provider, 6).await.unwrap();
        session.start_auto_refresh(Duration::from_secs(60));

        session.change_station();

        assert!(session.current().is_none());
        assert!(session.departures().is_empty());
        assert!(!session.is_auto_refreshing());
    }
}
