//! Station types.

use super::Coordinate;

/// A stop or station as reported by the transit provider.
///
/// The coordinate is optional because the provider omits it for some
/// entries (and some entries carry unusable values, which are treated the
/// same way).
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Provider identifier (e.g. "8503000").
    pub id: String,
    /// Display name (e.g. "Zürich HB").
    pub name: String,
    /// Position, when known.
    pub coordinate: Option<Coordinate>,
}

impl Station {
    /// Create a station.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        coordinate: Option<Coordinate>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinate,
        }
    }

    /// The identifier to query the provider with.
    ///
    /// Falls back to the name for entries without an id.
    pub fn query_key(&self) -> &str {
        if self.id.is_empty() {
            &self.name
        } else {
            &self.id
        }
    }
}

/// A station annotated with its distance from a search origin.
///
/// Only the ranker creates these, so `distance_meters` is always a finite,
/// non-negative great-circle distance.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStation {
    station: Station,
    distance_meters: f64,
}

impl RankedStation {
    pub(crate) fn new(station: Station, distance_meters: f64) -> Self {
        Self {
            station,
            distance_meters,
        }
    }

    /// The underlying station.
    pub fn station(&self) -> &Station {
        &self.station
    }

    /// Distance from the search origin in meters.
    pub fn distance_meters(&self) -> f64 {
        self.distance_meters
    }
}

/// The station whose board is being shown.
///
/// Stations reached through a nearby search keep their distance; stations
/// picked from a name search have none.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentStation {
    pub station: Station,
    pub distance_meters: Option<f64>,
}

impl CurrentStation {
    /// A station selected without a known distance.
    pub fn unranked(station: Station) -> Self {
        Self {
            station,
            distance_meters: None,
        }
    }
}

impl From<RankedStation> for CurrentStation {
    fn from(ranked: RankedStation) -> Self {
        Self {
            distance_meters: Some(ranked.distance_meters),
            station: ranked.station,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_key_prefers_id() {
        let s = Station::new("8503000", "Zürich HB", None);
        assert_eq!(s.query_key(), "8503000");

        let s = Station::new("", "Zürich HB", None);
        assert_eq!(s.query_key(), "Zürich HB");
    }

    #[test]
    fn current_from_ranked_keeps_distance() {
        let ranked = RankedStation::new(Station::new("1", "A", None), 42.0);
        let current = CurrentStation::from(ranked);
        assert_eq!(current.distance_meters, Some(42.0));
        assert_eq!(current.station.name, "A");
    }

    #[test]
    fn unranked_has_no_distance() {
        let current = CurrentStation::unranked(Station::new("1", "A", None));
        assert_eq!(current.distance_meters, None);
    }
}
