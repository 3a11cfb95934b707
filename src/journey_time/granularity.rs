//! Time resolution of a journey-time lookup.

use std::fmt;

use serde::{Serialize, Serializer};

/// Day of week as published by the journey-time source, `0..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weekday(u8);

impl Weekday {
    pub const COUNT: u8 = 7;

    /// Returns `None` outside `0..=6`.
    pub fn new(day: u8) -> Option<Self> {
        (day < Self::COUNT).then_some(Self(day))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Weekday> {
        (0..Self::COUNT).map(Weekday)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Emitted as an integer; JSON map keys become `"0"`..`"6"`.
impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

/// Hour of day, `0..=23`, always rendered with two digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hour(u8);

impl Hour {
    pub const COUNT: u8 = 24;

    /// Returns `None` outside `0..=23`.
    pub fn new(hour: u8) -> Option<Self> {
        (hour < Self::COUNT).then_some(Self(hour))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Hour> {
        (0..Self::COUNT).map(Hour)
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl Serialize for Hour {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which journey-time table a lookup is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// The all-time baseline ("normal") table.
    Aggregate,
    Hourly { weekday: Weekday, hour: Hour },
}

impl Granularity {
    /// Every (weekday, hour) pair, weekday-major: 168 in total.
    pub fn hourly_slots() -> impl Iterator<Item = (Weekday, Hour)> {
        Weekday::all().flat_map(|weekday| Hour::all().map(move |hour| (weekday, hour)))
    }

    /// [`Granularity::hourly_slots`] as table selectors.
    pub fn hourly() -> impl Iterator<Item = Granularity> {
        Self::hourly_slots().map(|(weekday, hour)| Granularity::Hourly { weekday, hour })
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Aggregate => f.write_str("normal"),
            Granularity::Hourly { weekday, hour } => write!(f, "{weekday}/{hour}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_and_hour_bounds() {
        assert!(Weekday::new(6).is_some());
        assert!(Weekday::new(7).is_none());
        assert!(Hour::new(23).is_some());
        assert!(Hour::new(24).is_none());
    }

    #[test]
    fn test_hour_is_zero_padded() {
        assert_eq!(Hour::new(7).unwrap().to_string(), "07");
        assert_eq!(Hour::new(23).unwrap().to_string(), "23");
    }

    #[test]
    fn test_hourly_covers_every_slice_once() {
        let all: Vec<_> = Granularity::hourly().collect();
        assert_eq!(all.len(), 168);

        let unique: std::collections::HashSet<_> = all.iter().copied().collect();
        assert_eq!(unique.len(), 168);

        assert_eq!(all[0].to_string(), "0/00");
        assert_eq!(all[167].to_string(), "6/23");
    }

    #[test]
    fn test_hourly_slots_match_selectors() {
        let slots: Vec<_> = Granularity::hourly_slots().collect();
        let selectors: Vec<_> = Granularity::hourly().collect();
        assert_eq!(slots.len(), 168);

        for ((weekday, hour), granularity) in slots.into_iter().zip(selectors) {
            assert_eq!(granularity, Granularity::Hourly { weekday, hour });
        }
    }

    #[test]
    fn test_aggregate_display() {
        assert_eq!(Granularity::Aggregate.to_string(), "normal");
    }

    #[test]
    fn test_serialized_keys() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(Weekday::new(3).unwrap(), Hour::new(5).unwrap());
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"3":"05"}"#);
    }
}
