//! Catalog shapes as fetched and as emitted.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// The upstream catalog document.
///
/// Entries stay undecoded until the normalizer reaches them, so a malformed
/// route or stop that no retained route needs never fails the run.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCatalog {
    #[serde(default)]
    pub route_list: BTreeMap<String, Value>,
    #[serde(default)]
    pub stop_list: BTreeMap<String, Value>,
}

/// A route variant. Only the designator, operators and stop paths survive
/// normalization; every other upstream field is dropped on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub route: String,
    /// Emitted exactly as the catalog spells it, string or list.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub co: Value,
    /// Operator code to ordered stop ids.
    #[serde(default)]
    pub stops: BTreeMap<String, Vec<String>>,
}

impl Route {
    /// A route is kept only if some operator has a non-empty stop path.
    pub fn has_stops(&self) -> bool {
        !self.stops.is_empty() && self.stops.values().any(|path| !path.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Catalog attributes of a stop, carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopInfo {
    pub location: Location,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// A stop in the merged output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    #[serde(flatten)]
    pub info: StopInfo,
    pub co: OperatorSet,
    pub nearby: Vec<String>,
}

impl Stop {
    /// Wraps catalog attributes, discarding any stale derived fields.
    pub fn from_info(mut info: StopInfo) -> Self {
        info.attributes.remove("co");
        info.attributes.remove("nearby");
        Self {
            info,
            co: OperatorSet::default(),
            nearby: Vec::new(),
        }
    }
}

/// Insertion-ordered set of operator codes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatorSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl OperatorSet {
    /// Appends `code` unless already present. Returns whether it was added.
    pub fn insert(&mut self, code: &str) -> bool {
        if self.seen.contains(code) {
            return false;
        }
        self.seen.insert(code.to_string());
        self.order.push(code.to_string());
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Serialize for OperatorSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}
