//! Transit data provider.
//!
//! HTTP client for the public Swiss transport API
//! (`transport.opendata.ch/v1`), plus a file-backed mock with the same
//! interface.
//!
//! Key characteristics of the API:
//! - Coordinates are sent as `x` (latitude) and `y` (longitude)
//! - Lists are omitted or `null` when nothing matches
//! - Stationboards and connections accept a station id or a name

mod client;
mod convert;
mod error;
mod mock;
mod provider;
mod types;

pub use client::{DEFAULT_BASE_URL, TransportClient, TransportConfig};
pub use convert::ConversionError;
pub use error::TransportError;
pub use mock::MockTransitClient;
pub use provider::TransitProvider;
pub use types::{
    CheckpointDto, ConnectionDto, ConnectionsResponse, CoordinateDto, JourneyDto, LocationDto,
    LocationsResponse, SectionDto, StationboardResponse,
};
