use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::pipeline::RouteTimeList;

/// Summary of one merge run, logged at the end and optionally appended
/// to a CSV history.
#[derive(Debug, Default, Serialize)]
pub struct RunStats {
    pub timestamp: DateTime<Utc>,

    // catalog
    pub routes_total: usize,
    pub routes_retained: usize,
    pub stops_total: usize,
    pub stops_retained: usize,
    pub missing_stops: usize,
    pub invalid_routes: usize,
    pub invalid_stops: usize,
    pub edges: usize,

    // journey times
    pub journey_origins: usize,
    pub journey_pairs: usize,
    pub pairs_with_normal: usize,
    pub hourly_values: usize,
    pub hourly_pruned: usize,
    pub tables_fetched: usize,
    pub fetch_failures: usize,

    // proximity
    pub nearby_pairs: usize,
}

impl RunStats {
    /// Counts what ended up in the merged document. Catalog, fetch and
    /// pruning counters are filled in by the pipeline.
    pub fn from_result(result: &RouteTimeList) -> Self {
        let mut s = RunStats {
            timestamp: Utc::now(),
            routes_retained: result.route_list.len(),
            stops_retained: result.stop_list.len(),
            journey_origins: result.journey_times.len(),
            ..Default::default()
        };

        for row in result.journey_times.values() {
            s.journey_pairs += row.len();

            for entry in row.values() {
                if entry.normal.is_some() {
                    s.pairs_with_normal += 1;
                }
                s.hourly_values += entry.hourly.values().map(|hours| hours.len()).sum::<usize>();
            }
        }

        s
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    /// Share of catalog routes that survived normalization.
    pub fn routes_retained_pct(&self) -> f64 {
        Self::pct(self.routes_retained, self.routes_total)
    }

    /// Share of resolved pairs that have an aggregate time.
    pub fn normal_coverage_pct(&self) -> f64 {
        Self::pct(self.pairs_with_normal, self.journey_pairs)
    }
}
