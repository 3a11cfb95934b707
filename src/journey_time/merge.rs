//! Resolves the journey time for each adjacency.
//!
//! Every value is rounded to two decimals before it is compared, so the
//! minimum reduction and the equality pruning both work on rounded numbers.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use super::{Granularity, Hour, JourneyTimeCache, Weekday};
use crate::catalog::Edge;
use crate::services::JourneyTimeApi;

/// Rounds minutes to two decimals, halves away from zero.
pub fn round_minutes(minutes: f64) -> f64 {
    (minutes * 100.0).round() / 100.0
}

/// Merged journey time between one origin and one destination.
///
/// Serializes as `{"normal": n, "<weekday>": {"<HH>": n}}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JourneyTimeEntry {
    pub normal: Option<f64>,
    pub hourly: BTreeMap<Weekday, BTreeMap<Hour, f64>>,
}

impl JourneyTimeEntry {
    /// Keeps `minutes` as the aggregate if none is set yet or it is smaller.
    pub fn offer_normal(&mut self, minutes: f64) {
        if self.normal.is_none_or(|current| minutes < current) {
            self.normal = Some(minutes);
        }
    }

    /// Same as [`offer_normal`](Self::offer_normal) for one hourly slot.
    pub fn offer_hourly(&mut self, weekday: Weekday, hour: Hour, minutes: f64) {
        let slot = self.hourly.entry(weekday).or_default().entry(hour).or_insert(minutes);
        if minutes < *slot {
            *slot = minutes;
        }
    }

    pub fn hourly_value(&self, weekday: Weekday, hour: Hour) -> Option<f64> {
        self.hourly.get(&weekday)?.get(&hour).copied()
    }

    /// Drops hourly values equal to the aggregate, then empty weekdays.
    /// Without an aggregate nothing is removed. Returns the number of
    /// values dropped.
    pub fn prune(&mut self) -> usize {
        let Some(normal) = self.normal else {
            return 0;
        };

        let mut pruned = 0;
        self.hourly.retain(|_, hours| {
            let before = hours.len();
            hours.retain(|_, minutes| *minutes != normal);
            pruned += before - hours.len();
            !hours.is_empty()
        });
        pruned
    }
}

impl Serialize for JourneyTimeEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.hourly.len() + usize::from(self.normal.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(normal) = self.normal {
            map.serialize_entry("normal", &normal)?;
        }
        for (weekday, hours) in &self.hourly {
            map.serialize_entry(weekday, hours)?;
        }
        map.end()
    }
}

/// Origin stop id to destination stop id to merged entry.
pub type JourneyTimes = BTreeMap<String, BTreeMap<String, JourneyTimeEntry>>;

/// Accumulates [`JourneyTimeEntry`] values over all edges.
#[derive(Debug, Default)]
pub struct JourneyTimeMerger {
    times: JourneyTimes,
}

impl JourneyTimeMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds the aggregate and all 168 hourly durations of one edge into
    /// the table. The origin gets a (possibly empty) row even when no
    /// table knows the pair.
    pub async fn merge_edge<A: JourneyTimeApi>(
        &mut self,
        cache: &mut JourneyTimeCache<A>,
        edge: &Edge,
    ) {
        let row = self.times.entry(edge.origin.clone()).or_default();

        if let Some(&minutes) = cache
            .get(&edge.origin, Granularity::Aggregate)
            .await
            .get(&edge.destination)
        {
            row.entry(edge.destination.clone())
                .or_default()
                .offer_normal(round_minutes(minutes));
        }

        for (weekday, hour) in Granularity::hourly_slots() {
            if let Some(&minutes) = cache
                .get(&edge.origin, Granularity::Hourly { weekday, hour })
                .await
                .get(&edge.destination)
            {
                row.entry(edge.destination.clone())
                    .or_default()
                    .offer_hourly(weekday, hour, round_minutes(minutes));
            }
        }
    }

    /// Runs the pruning post-pass and hands back the table together with
    /// the number of hourly values removed.
    pub fn finish(mut self) -> (JourneyTimes, usize) {
        let mut pruned = 0;
        for row in self.times.values_mut() {
            for entry in row.values_mut() {
                pruned += entry.prune();
            }
        }
        debug!(origins = self.times.len(), pruned, "Journey-time merge finished");
        (self.times, pruned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey_time::cache::tests::FakeTimes;

    fn wd(day: u8) -> Weekday {
        Weekday::new(day).unwrap()
    }

    fn hr(hour: u8) -> Hour {
        Hour::new(hour).unwrap()
    }

    fn hourly(day: u8, hour: u8) -> Granularity {
        Granularity::Hourly {
            weekday: wd(day),
            hour: hr(hour),
        }
    }

    fn edge(origin: &str, destination: &str) -> Edge {
        Edge {
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    async fn merge_all(fake: FakeTimes, edges: &[Edge]) -> (JourneyTimes, usize) {
        let mut cache = JourneyTimeCache::new(fake);
        let mut merger = JourneyTimeMerger::new();
        for e in edges {
            merger.merge_edge(&mut cache, e).await;
        }
        merger.finish()
    }

    #[test]
    fn test_round_minutes_half_away_from_zero() {
        assert_eq!(round_minutes(3.456), 3.46);
        assert_eq!(round_minutes(0.125), 0.13);
        assert_eq!(round_minutes(2.0), 2.0);
        assert_eq!(round_minutes(1.234), 1.23);
    }

    #[test]
    fn test_offer_keeps_minimum() {
        let mut entry = JourneyTimeEntry::default();
        entry.offer_normal(5.0);
        entry.offer_normal(4.5);
        entry.offer_normal(4.75);
        assert_eq!(entry.normal, Some(4.5));

        entry.offer_hourly(wd(1), hr(8), 6.0);
        entry.offer_hourly(wd(1), hr(8), 7.0);
        entry.offer_hourly(wd(1), hr(8), 5.5);
        assert_eq!(entry.hourly_value(wd(1), hr(8)), Some(5.5));
    }

    #[test]
    fn test_prune_removes_equal_values_and_empty_weekdays() {
        let mut entry = JourneyTimeEntry::default();
        entry.offer_normal(4.5);
        entry.offer_hourly(wd(0), hr(0), 4.5);
        entry.offer_hourly(wd(2), hr(7), 4.5);
        entry.offer_hourly(wd(2), hr(8), 6.25);

        assert_eq!(entry.prune(), 2);
        assert!(!entry.hourly.contains_key(&wd(0)));
        assert_eq!(entry.hourly_value(wd(2), hr(7)), None);
        assert_eq!(entry.hourly_value(wd(2), hr(8)), Some(6.25));
    }

    #[test]
    fn test_prune_without_normal_keeps_everything() {
        let mut entry = JourneyTimeEntry::default();
        entry.offer_hourly(wd(3), hr(12), 4.5);

        assert_eq!(entry.prune(), 0);
        assert_eq!(entry.hourly_value(wd(3), hr(12)), Some(4.5));
    }

    #[test]
    fn test_entry_serialization() {
        let mut entry = JourneyTimeEntry::default();
        entry.offer_normal(4.5);
        entry.offer_hourly(wd(0), hr(7), 5.0);

        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"normal":4.5,"0":{"07":5.0}}"#
        );

        let hourly_only = JourneyTimeEntry {
            normal: None,
            hourly: BTreeMap::from([(wd(6), BTreeMap::from([(hr(23), 1.25)]))]),
        };
        assert_eq!(
            serde_json::to_string(&hourly_only).unwrap(),
            r#"{"6":{"23":1.25}}"#
        );
    }

    #[tokio::test]
    async fn test_min_reduction_across_edges_sharing_a_pair() {
        let mut first = JourneyTimeCache::new(
            FakeTimes::default().with(Granularity::Aggregate, &[("A", "B", 5.0)]),
        );
        let mut second = JourneyTimeCache::new(
            FakeTimes::default().with(Granularity::Aggregate, &[("A", "B", 4.5)]),
        );
        let mut merger = JourneyTimeMerger::new();

        merger.merge_edge(&mut first, &edge("A", "B")).await;
        merger.merge_edge(&mut second, &edge("A", "B")).await;
        merger.merge_edge(&mut first, &edge("A", "B")).await;

        let (times, _) = merger.finish();
        assert_eq!(times["A"]["B"].normal, Some(4.5));
    }

    #[tokio::test]
    async fn test_hourly_equal_after_rounding_is_pruned() {
        let fake = FakeTimes::default()
            .with(Granularity::Aggregate, &[("A", "B", 3.456)])
            .with(hourly(1, 8), &[("A", "B", 3.4649)])
            .with(hourly(1, 9), &[("A", "B", 7.0)])
            .with(hourly(4, 18), &[("A", "B", 3.46)]);

        let (times, pruned) = merge_all(fake, &[edge("A", "B")]).await;

        let entry = &times["A"]["B"];
        assert_eq!(entry.normal, Some(3.46));
        assert_eq!(pruned, 2);
        assert_eq!(entry.hourly_value(wd(1), hr(8)), None);
        assert_eq!(entry.hourly_value(wd(1), hr(9)), Some(7.0));
        assert!(!entry.hourly.contains_key(&wd(4)));
    }

    #[tokio::test]
    async fn test_hourly_kept_when_no_aggregate() {
        let fake = FakeTimes::default().with(hourly(0, 0), &[("A", "B", 2.0)]);

        let (times, pruned) = merge_all(fake, &[edge("A", "B")]).await;

        assert_eq!(pruned, 0);
        assert_eq!(times["A"]["B"].normal, None);
        assert_eq!(times["A"]["B"].hourly_value(wd(0), hr(0)), Some(2.0));
    }

    #[tokio::test]
    async fn test_origin_row_exists_without_data() {
        let (times, _) = merge_all(FakeTimes::default(), &[edge("A", "B")]).await;

        assert!(times["A"].is_empty());
    }

    #[tokio::test]
    async fn test_each_table_fetched_once_over_many_edges() {
        let fake = FakeTimes::default().with(Granularity::Aggregate, &[("A", "B", 1.0)]);
        let mut cache = JourneyTimeCache::new(fake);
        let mut merger = JourneyTimeMerger::new();
        for e in [edge("A", "B"), edge("B", "C"), edge("A", "B")] {
            merger.merge_edge(&mut cache, &e).await;
        }

        assert_eq!(cache.tables_cached(), 169);
        assert_eq!(cache.failures(), 0);
    }
}
