//! Read-through cache of journey-time tables.
//!
//! Each granularity's table covers every origin stop, so a single fetch
//! serves all later lookups for that granularity. Entries live for the
//! whole run; failed fetches are not remembered.

use std::collections::HashMap;

use tracing::{debug, error};

use super::{Granularity, JourneyTimeTable, StopTimes};
use crate::services::JourneyTimeApi;

static NO_TIMES: StopTimes = StopTimes::new();

pub struct JourneyTimeCache<A> {
    api: A,
    tables: HashMap<Granularity, JourneyTimeTable>,
    failures: usize,
}

impl<A: JourneyTimeApi> JourneyTimeCache<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            tables: HashMap::new(),
            failures: 0,
        }
    }

    /// Journey times from `stop_id` at `granularity`.
    ///
    /// Fetches the table on first use. Returns an empty mapping when the
    /// fetch fails or the stop has no row.
    pub async fn get(&mut self, stop_id: &str, granularity: Granularity) -> &StopTimes {
        if !self.tables.contains_key(&granularity) {
            match self.api.fetch_times(granularity).await {
                Ok(table) => {
                    debug!(%granularity, origins = table.len(), "Journey-time table cached");
                    self.tables.insert(granularity, table);
                }
                Err(e) => {
                    error!(stop_id, %granularity, error = %e, "Journey-time fetch failed");
                    self.failures += 1;
                    return &NO_TIMES;
                }
            }
        }

        self.tables
            .get(&granularity)
            .and_then(|table| table.get(stop_id))
            .unwrap_or(&NO_TIMES)
    }

    /// Number of tables currently held.
    pub fn tables_cached(&self) -> usize {
        self.tables.len()
    }

    /// Number of fetch attempts that failed.
    pub fn failures(&self) -> usize {
        self.failures
    }
}
