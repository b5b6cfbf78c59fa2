//! Station ranking by distance from an origin.

use tracing::debug;

use crate::domain::{Coordinate, RankedStation, Station};

use super::distance::distance;

/// Rank candidate stations by distance from `origin`.
///
/// Stations are:
/// 1. Dropped if they have no usable coordinate
/// 2. Annotated with their great-circle distance from `origin`
/// 3. Dropped if farther than `radius_meters` (a station exactly on the
///    radius is kept)
/// 4. Sorted nearest-first
///
/// The sort is stable, so stations at equal distance keep the order the
/// provider returned them in. An empty result means nothing lies within
/// the radius.
///
/// `radius_meters` must be finite; callers validate it.
pub fn rank_stations(
    stations: &[Station],
    origin: Coordinate,
    radius_meters: f64,
) -> Vec<RankedStation> {
    let mut ranked: Vec<RankedStation> = stations
        .iter()
        .filter_map(|station| {
            let Some(coordinate) = station.coordinate else {
                debug!(station = %station.name, "skipping station without coordinates");
                return None;
            };
            let distance_meters = distance(origin, coordinate);
            debug!(station = %station.name, distance_meters, "candidate station");
            Some(RankedStation::new(station.clone(), distance_meters))
        })
        .filter(|s| s.distance_meters() <= radius_meters)
        .collect();

    ranked.sort_by(|a, b| a.distance_meters().total_cmp(&b.distance_meters()));

    debug!(
        candidates = stations.len(),
        kept = ranked.len(),
        radius_meters,
        "ranked nearby stations"
    );

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn station(name: &str, coordinate: Option<Coordinate>) -> Station {
        Station::new(name.to_lowercase(), name, coordinate)
    }

    #[test]
    fn drops_stations_without_coordinates() {
        let stations = vec![station("A", None), station("B", Some(coord(0.0, 0.0)))];

        let ranked = rank_stations(&stations, coord(0.0, 0.0), 1000.0);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].station().name, "B");
        assert_eq!(ranked[0].distance_meters(), 0.0);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(rank_stations(&[], coord(47.0, 8.0), 1000.0).is_empty());
    }

    #[test]
    fn sorts_nearest_first() {
        // Roughly 111 m per 0.001 degree of latitude
        let stations = vec![
            station("Far", Some(coord(0.003, 0.0))),
            station("Near", Some(coord(0.001, 0.0))),
            station("Mid", Some(coord(0.002, 0.0))),
        ];

        let ranked = rank_stations(&stations, coord(0.0, 0.0), 1000.0);
        let names: Vec<_> = ranked.iter().map(|s| s.station().name.as_str()).collect();

        assert_eq!(names, vec!["Near", "Mid", "Far"]);
    }

    #[test]
    fn filters_beyond_radius() {
        let stations = vec![
            station("Inside", Some(coord(0.001, 0.0))),
            station("Outside", Some(coord(0.1, 0.0))),
        ];

        let ranked = rank_stations(&stations, coord(0.0, 0.0), 500.0);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].station().name, "Inside");
    }

    #[test]
    fn station_on_radius_is_kept() {
        let target = coord(0.001, 0.0);
        let origin = coord(0.0, 0.0);
        let exact = distance(origin, target);

        let ranked = rank_stations(&[station("Edge", Some(target))], origin, exact);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn ties_keep_input_order() {
        let p = coord(0.001, 0.0);
        let stations = vec![
            station("First", Some(p)),
            station("Second", Some(p)),
            station("Third", Some(p)),
        ];

        let ranked = rank_stations(&stations, coord(0.0, 0.0), 1000.0);
        let names: Vec<_> = ranked.iter().map(|s| s.station().name.as_str()).collect();

        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn input_is_untouched() {
        let stations = vec![
            station("B", Some(coord(0.002, 0.0))),
            station("A", Some(coord(0.001, 0.0))),
        ];
        let before = stations.clone();

        let _ = rank_stations(&stations, coord(0.0, 0.0), 1000.0);

        assert_eq!(stations, before);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        // Keep candidates within a few km so the radius filter matters
        (46.9f64..47.1, 8.4f64..8.6).prop_map(|(lat, lon)| Coordinate::new(lat, lon).unwrap())
    }

    fn stations() -> impl Strategy<Value = Vec<Station>> {
        prop::collection::vec(
            (
                "[A-Z][a-z]{2,8}",
                prop::option::weighted(0.8, coordinate()),
            ),
            0..30,
        )
        .prop_map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (name, c))| Station::new(i.to_string(), name, c))
                .collect()
        })
    }

    proptest! {
        /// Nothing beyond the radius is returned
        #[test]
        fn within_radius(s in stations(), origin in coordinate(), radius in 0.0f64..20_000.0) {
            for r in rank_stations(&s, origin, radius) {
                prop_assert!(r.distance_meters() <= radius);
            }
        }

        /// Output is sorted by distance
        #[test]
        fn sorted(s in stations(), origin in coordinate(), radius in 0.0f64..20_000.0) {
            let ranked = rank_stations(&s, origin, radius);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].distance_meters() <= pair[1].distance_meters());
            }
        }

        /// Every kept station had a coordinate, and every station with a
        /// coordinate inside the radius is kept
        #[test]
        fn keeps_exactly_the_reachable(s in stations(), origin in coordinate(), radius in 0.0f64..20_000.0) {
            let ranked = rank_stations(&s, origin, radius);
            let expected = s
                .iter()
                .filter(|st| st.coordinate.is_some_and(|c| distance(origin, c) <= radius))
                .count();
            prop_assert_eq!(ranked.len(), expected);
            prop_assert!(ranked.iter().all(|r| r.station().coordinate.is_some()));
        }

        /// Same inputs, same outputs
        #[test]
        fn deterministic(s in stations(), origin in coordinate(), radius in 0.0f64..20_000.0) {
            prop_assert_eq!(
                rank_stations(&s, origin, radius),
                rank_stations(&s, origin, radius)
            );
        }
    }
}
