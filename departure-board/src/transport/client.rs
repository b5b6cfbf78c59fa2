//! Transport API HTTP client.
//!
//! Async access to the public `transport.opendata.ch` REST API. No API key
//! is needed. Failed requests are reported as-is; there is no retry.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Coordinate, Departure, Route, Station};

use super::convert::{convert_connection, convert_locations, convert_stationboard};
use super::error::TransportError;
use super::provider::TransitProvider;
use super::types::{ConnectionsResponse, LocationsResponse, StationboardResponse};

/// Default base URL for the transport API.
pub const DEFAULT_BASE_URL: &str = "https://transport.opendata.ch/v1";

/// How much of an unparseable body to keep for diagnostics.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the transport client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TransportConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the transport API.
#[derive(Debug, Clone)]
pub struct TransportClient {
    http: reqwest::Client,
    base_url: String,
}

impl TransportClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("departure-board/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an endpoint and decode its JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, TransportError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, ?query, "transport API request");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransportError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TransportError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
        })
    }
}

impl TransitProvider for TransportClient {
    async fn stations_near(&self, origin: Coordinate) -> Result<Vec<Station>, TransportError> {
        let response: LocationsResponse = self
            .get_json(
                "locations",
                &[
                    ("x", origin.latitude().to_string()),
                    ("y", origin.longitude().to_string()),
                    ("type", "station".to_string()),
                ],
            )
            .await?;

        let stations = convert_locations(&response);
        debug!(%origin, found = stations.len(), "stations near position");
        Ok(stations)
    }

    async fn search_stations(&self, query: &str) -> Result<Vec<Station>, TransportError> {
        let response: LocationsResponse = self
            .get_json(
                "locations",
                &[("query", query.to_string()), ("type", "station".to_string())],
            )
            .await?;

        Ok(convert_locations(&response))
    }

    async fn stationboard(
        &self,
        station: &str,
        limit: u8,
    ) -> Result<Vec<Departure>, TransportError> {
        let response: StationboardResponse = self
            .get_json(
                "stationboard",
                &[("station", station.to_string()), ("limit", limit.to_string())],
            )
            .await?;

        Ok(convert_stationboard(&response))
    }

    async fn connection(&self, from: &str, to: &str) -> Result<Option<Route>, TransportError> {
        let response: ConnectionsResponse = self
            .get_json(
                "connections",
                &[
                    ("from", from.to_string()),
                    ("to", to.to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        Ok(convert_connection(&response)?)
    }
}
