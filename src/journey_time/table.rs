//! Tolerant decoding of a fetched journey-time table.

use serde_json::Value;
use tracing::warn;

use super::{Granularity, JourneyTimeTable, StopTimes};

/// Builds a table from a decoded document, keeping every numeric duration.
///
/// Non-numeric durations and non-object origin rows are dropped and
/// reported in one `warn!` per table, so a stray `null` costs one pair
/// instead of the whole granularity.
pub fn decode_table(document: Value, granularity: Granularity) -> JourneyTimeTable {
    let Value::Object(origins) = document else {
        warn!(%granularity, "Journey-time document is not an object, treating as empty");
        return JourneyTimeTable::new();
    };

    let mut table = JourneyTimeTable::new();
    let mut skipped = 0usize;
    for (origin, row) in origins {
        let Value::Object(row) = row else {
            skipped += 1;
            continue;
        };

        let mut times = StopTimes::new();
        for (destination, minutes) in row {
            match minutes.as_f64() {
                Some(minutes) => {
                    times.insert(destination, minutes);
                }
                None => skipped += 1,
            }
        }
        table.insert(origin, times);
    }

    if skipped > 0 {
        warn!(%granularity, skipped, "Dropped non-numeric journey-time entries");
    }
    table
}
