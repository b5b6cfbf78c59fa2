//! Nearby station resolution.
//!
//! Turns a position into a nearest-first list of stations within a search
//! radius. The distance and ranking functions are pure; `find_nearby`
//! adds the provider lookup in front of them.

mod distance;
mod rank;

pub use distance::{EARTH_RADIUS_METERS, distance, format_distance};
pub use rank::rank_stations;

use crate::domain::{Coordinate, RankedStation};
use crate::transport::{TransitProvider, TransportError};

/// Look up stations around `origin` and rank them within `radius_meters`.
///
/// An empty result means the provider found stations, but none inside the
/// radius (or none at all).
pub async fn find_nearby<P: TransitProvider>(
    provider: &P,
    origin: Coordinate,
    radius_meters: f64,
) -> Result<Vec<RankedStation>, TransportError> {
    let candidates = provider.stations_near(origin).await?;
    Ok(rank_stations(&candidates, origin, radius_meters))
}
