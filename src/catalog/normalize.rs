//! Route filtering, stop collection and adjacency extraction.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, warn};

use super::types::{RawCatalog, Route, Stop, StopInfo};

/// A consecutive stop pair along one operator's path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub origin: String,
    pub destination: String,
}

/// Output of [`normalize`].
#[derive(Debug, Default)]
pub struct NormalizedCatalog {
    pub routes: BTreeMap<String, Route>,
    pub stops: BTreeMap<String, Stop>,
    /// Every adjacency in traversal order, duplicates included.
    pub edges: Vec<Edge>,
    pub routes_total: usize,
    pub stops_total: usize,
    /// Path entries whose stop id has no `stopList` record.
    pub missing_stops: usize,
    /// `routeList` entries that are not a route object.
    pub invalid_routes: usize,
    /// Referenced `stopList` entries without a usable location.
    pub invalid_stops: usize,
}

/// Keeps routes that have at least one non-empty stop path, collects every
/// stop they reference along with the operators serving it, and records
/// each consecutive stop pair for the journey-time merge.
///
/// Stop records are decoded only when a retained route references them.
pub fn normalize(catalog: RawCatalog) -> NormalizedCatalog {
    let RawCatalog {
        route_list,
        mut stop_list,
    } = catalog;

    let mut out = NormalizedCatalog {
        routes_total: route_list.len(),
        stops_total: stop_list.len(),
        ..Default::default()
    };
    let mut rejected: HashSet<String> = HashSet::new();

    for (route_key, value) in route_list {
        let route: Route = match serde_json::from_value(value) {
            Ok(route) => route,
            Err(e) => {
                warn!(route_key = %route_key, error = %e, "Skipping malformed route");
                out.invalid_routes += 1;
                continue;
            }
        };
        if !route.has_stops() {
            debug!(route_key = %route_key, "Dropping route without stops");
            continue;
        }

        for (co, path) in &route.stops {
            for stop_id in path {
                if let Some(stop) = out.stops.get_mut(stop_id) {
                    stop.co.insert(co);
                } else if rejected.contains(stop_id) {
                    continue;
                } else if let Some(value) = stop_list.remove(stop_id) {
                    match serde_json::from_value::<StopInfo>(value) {
                        Ok(info) => {
                            let mut stop = Stop::from_info(info);
                            stop.co.insert(co);
                            out.stops.insert(stop_id.clone(), stop);
                        }
                        Err(e) => {
                            warn!(stop_id = %stop_id, error = %e, "Skipping malformed stop");
                            out.invalid_stops += 1;
                            rejected.insert(stop_id.clone());
                        }
                    }
                } else {
                    warn!(route_key = %route_key, stop_id = %stop_id, "Stop missing from stop list");
                    out.missing_stops += 1;
                }
            }

            out.edges.extend(path.windows(2).map(|pair| Edge {
                origin: pair[0].clone(),
                destination: pair[1].clone(),
            }));
        }

        out.routes.insert(route_key, route);
    }

    out
}
