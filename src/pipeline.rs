//! End-to-end merge: catalog, journey times, proximity.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::catalog::{Route, Stop, normalize};
use crate::journey_time::{JourneyTimeCache, JourneyTimeMerger, JourneyTimes};
use crate::nearby::attach_nearby;
use crate::services::{CatalogApi, JourneyTimeApi};
use crate::stats::RunStats;

/// The merged document written to disk.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTimeList {
    pub route_list: BTreeMap<String, Route>,
    pub stop_list: BTreeMap<String, Stop>,
    pub journey_times: JourneyTimes,
}

/// Fetches the catalog, normalizes it, resolves journey times for every
/// adjacency and attaches nearby stops.
///
/// # Errors
///
/// Fails only if the catalog cannot be fetched or decoded. Journey-time
/// fetch failures are logged and leave the affected pairs without data.
#[tracing::instrument(skip_all)]
pub async fn build_route_time_list<C, J>(
    catalog_api: &C,
    journey_api: J,
) -> Result<(RouteTimeList, RunStats)>
where
    C: CatalogApi,
    J: JourneyTimeApi,
{
    info!("Fetching route catalog");
    let raw = catalog_api
        .fetch_catalog()
        .await
        .context("Route catalog is required")?;

    let catalog = normalize(raw);
    info!(
        routes = catalog.routes.len(),
        routes_total = catalog.routes_total,
        stops = catalog.stops.len(),
        edges = catalog.edges.len(),
        missing_stops = catalog.missing_stops,
        invalid_routes = catalog.invalid_routes,
        invalid_stops = catalog.invalid_stops,
        "Catalog normalized"
    );

    let mut cache = JourneyTimeCache::new(journey_api);
    let mut merger = JourneyTimeMerger::new();
    for (i, edge) in catalog.edges.iter().enumerate() {
        merger.merge_edge(&mut cache, edge).await;
        if (i + 1) % 10_000 == 0 {
            info!(done = i + 1, total = catalog.edges.len(), "Merging journey times");
        }
    }
    let (journey_times, hourly_pruned) = merger.finish();
    info!(
        origins = journey_times.len(),
        tables = cache.tables_cached(),
        failures = cache.failures(),
        hourly_pruned,
        "Journey times merged"
    );

    let mut stops = catalog.stops;
    let nearby_pairs = attach_nearby(&mut stops);
    info!(nearby_pairs, "Nearby stops computed");

    let result = RouteTimeList {
        route_list: catalog.routes,
        stop_list: stops,
        journey_times,
    };

    let stats = RunStats {
        routes_total: catalog.routes_total,
        stops_total: catalog.stops_total,
        missing_stops: catalog.missing_stops,
        invalid_routes: catalog.invalid_routes,
        invalid_stops: catalog.invalid_stops,
        edges: catalog.edges.len(),
        hourly_pruned,
        tables_fetched: cache.tables_cached(),
        fetch_failures: cache.failures(),
        nearby_pairs,
        ..RunStats::from_result(&result)
    };

    Ok((result, stats))
}
