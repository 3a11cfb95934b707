//! Walking-distance neighbours between stops.
//!
//! A plain all-pairs scan. At a few thousand stops this is fast enough;
//! a lat/lng grid would be the next step if the catalog grows much larger.

use std::collections::BTreeMap;

use tracing::debug;

use crate::catalog::{Location, Stop};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Stops at most this far apart list each other as nearby.
pub const NEARBY_RADIUS_KM: f64 = 0.3;

/// Great-circle distance in kilometres between two points in degrees.
pub fn haversine_km(a: &Location, b: &Location) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = lat2 - lat1;
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Fills every stop's `nearby` list with the other stops within
/// [`NEARBY_RADIUS_KM`], in stop-map order. Returns the number of
/// neighbouring pairs found.
pub fn attach_nearby(stops: &mut BTreeMap<String, Stop>) -> usize {
    let points: Vec<(&String, Location)> = stops
        .iter()
        .map(|(id, stop)| (id, stop.info.location))
        .collect();

    let mut neighbours: Vec<Vec<String>> = vec![Vec::new(); points.len()];
    let mut pairs = 0;

    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if haversine_km(&points[i].1, &points[j].1) <= NEARBY_RADIUS_KM {
                neighbours[i].push(points[j].0.clone());
                neighbours[j].push(points[i].0.clone());
                pairs += 1;
            }
        }
    }

    for (stop, nearby) in stops.values_mut().zip(neighbours) {
        stop.nearby = nearby;
    }

    debug!(stops = stops.len(), pairs, "Nearby stops attached");
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StopInfo;

    fn loc(lat: f64, lng: f64) -> Location {
        Location { lat, lng }
    }

    fn stops(points: &[(&str, f64, f64)]) -> BTreeMap<String, Stop> {
        points
            .iter()
            .map(|(id, lat, lng)| {
                let info = StopInfo {
                    location: loc(*lat, *lng),
                    attributes: Default::default(),
                };
                (id.to_string(), Stop::from_info(info))
            })
            .collect()
    }

    #[test]
    fn test_haversine_known_distances() {
        let d = haversine_km(&loc(22.3, 114.17), &loc(22.302, 114.17));
        assert!((d - 0.2224).abs() < 0.001, "got {d}");

        let d = haversine_km(&loc(22.3, 114.17), &loc(22.4, 114.17));
        assert!((d - 11.12).abs() < 0.01, "got {d}");

        // One degree of longitude on the equator.
        let d = haversine_km(&loc(0.0, 0.0), &loc(0.0, 1.0));
        assert!((d - 111.195).abs() < 0.01, "got {d}");

        assert_eq!(haversine_km(&loc(22.3, 114.17), &loc(22.3, 114.17)), 0.0);
    }

    #[test]
    fn test_close_stops_list_each_other() {
        let mut map = stops(&[
            ("A", 22.3000, 114.1700),
            ("B", 22.3020, 114.1700),
            ("C", 22.4000, 114.1700),
        ]);

        let pairs = attach_nearby(&mut map);

        assert_eq!(pairs, 1);
        assert_eq!(map["A"].nearby, ["B"]);
        assert_eq!(map["B"].nearby, ["A"]);
        assert!(map["C"].nearby.is_empty());
    }

    #[test]
    fn test_colocated_stops_are_neighbours_but_not_self() {
        let mut map = stops(&[("A", 22.3, 114.17), ("B", 22.3, 114.17)]);

        attach_nearby(&mut map);

        assert_eq!(map["A"].nearby, ["B"]);
        assert_eq!(map["B"].nearby, ["A"]);
    }

    #[test]
    fn test_nearby_is_symmetric_and_ordered() {
        let mut map = stops(&[
            ("A", 22.3000, 114.1700),
            ("B", 22.3015, 114.1710),
            ("C", 22.3030, 114.1720),
            ("D", 22.2990, 114.1695),
            ("E", 22.3100, 114.1800),
        ]);

        attach_nearby(&mut map);

        for (a, stop_a) in &map {
            assert!(!stop_a.nearby.contains(a));
            for (b, stop_b) in &map {
                assert_eq!(stop_a.nearby.contains(b), stop_b.nearby.contains(a));
            }
            let mut sorted = stop_a.nearby.clone();
            sorted.sort();
            assert_eq!(sorted, stop_a.nearby);
        }
        assert_eq!(map["A"].nearby, ["B", "D"]);
    }
}
