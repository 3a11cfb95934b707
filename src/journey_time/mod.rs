//! Inter-stop journey times: granularity selectors, the per-run table cache
//! and the min-reduce/prune merge.

pub mod cache;
pub mod granularity;
pub mod merge;
pub mod table;

use std::collections::BTreeMap;

pub use cache::JourneyTimeCache;
pub use granularity::{Granularity, Hour, Weekday};
pub use merge::{JourneyTimeEntry, JourneyTimeMerger, JourneyTimes, round_minutes};
pub use table::decode_table;

/// Destination stop id to raw duration in minutes, for one origin.
pub type StopTimes = BTreeMap<String, f64>;

/// Origin stop id to [`StopTimes`]: one whole table for one granularity.
pub type JourneyTimeTable = BTreeMap<String, StopTimes>;
