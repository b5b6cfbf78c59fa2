//! Short-lived caching of provider responses.
//!
//! Every open page refreshes its board once a minute, so several clients
//! watching the same station would repeat the same stationboard request.
//! Boards and name searches are kept for a few seconds and shared. Entries
//! are never served after their TTL and nothing is written to disk.
//!
//! Position lookups are not cached: float coordinates make poor keys and
//! each one is made once per "use my location" click.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{Coordinate, Departure, Route, Station};
use crate::transport::{TransitProvider, TransportError};

/// Cache key for stationboards: (station id or name, row limit).
type BoardKey = (String, u8);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per kind.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15),
            max_capacity: 500,
        }
    }
}

/// Transit provider with response caching.
///
/// Wraps any `TransitProvider` and implements the same interface.
pub struct CachedTransitClient<P> {
    inner: P,
    boards: MokaCache<BoardKey, Arc<Vec<Departure>>>,
    searches: MokaCache<String, Arc<Vec<Station>>>,
}

impl<P: TransitProvider> CachedTransitClient<P> {
    /// Create a new cached client.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let boards = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let searches = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            inner,
            boards,
            searches,
        }
    }

    /// Access the underlying provider for operations that bypass the cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.boards.invalidate_all();
        self.searches.invalidate_all();
    }
}

impl<P: TransitProvider> TransitProvider for CachedTransitClient<P> {
    async fn stations_near(&self, origin: Coordinate) -> Result<Vec<Station>, TransportError> {
        self.inner.stations_near(origin).await
    }

    async fn search_stations(&self, query: &str) -> Result<Vec<Station>, TransportError> {
        // The key is exactly what the inner provider is asked for
        let query = query.trim();

        if let Some(cached) = self.searches.get(query).await {
            debug!(query, "station search cache hit");
            return Ok(cached.as_ref().clone());
        }

        let stations = self.inner.search_stations(query).await?;
        self.searches
            .insert(query.to_string(), Arc::new(stations.clone()))
            .await;

        Ok(stations)
    }

    async fn stationboard(
        &self,
        station: &str,
        limit: u8,
    ) -> Result<Vec<Departure>, TransportError> {
        let key = (station.to_string(), limit);

        if let Some(cached) = self.boards.get(&key).await {
            debug!(station, "stationboard cache hit");
            return Ok(cached.as_ref().clone());
        }

        let departures = self.inner.stationboard(station, limit).await?;
        self.boards.insert(key, Arc::new(departures.clone())).await;

        Ok(departures)
    }

    async fn connection(&self, from: &str, to: &str) -> Result<Option<Route>, TransportError> {
        self.inner.connection(from, to).await
    }
}
