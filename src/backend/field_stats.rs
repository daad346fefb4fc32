//! Field Statistics DTOs
//!
//! Request and response shapes of the backend's field-statistics endpoint.
//!
//! ```text
//! request:  { index, level: "indices",
//!             body: { fields: [f], index_constraints: { f: { max_value: {gte}, min_value: {lte} } } } }
//! response: { indices: { name: { fields: { f: { min_value, max_value } } } } }
//! ```
//!
//! The `indices` object is decoded into an association list so that the
//! backend's enumeration order survives.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Statistics granularity requested from the backend
pub const LEVEL_INDICES: &str = "indices";

/// Field statistics request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldStatsRequest {
    /// Index pattern, sent unchanged
    pub index: String,
    /// Always `indices`: per-index rather than per-shard statistics
    pub level: String,
    pub body: FieldStatsBody,
}

impl FieldStatsRequest {
    /// Build a per-index request for one field and its constraint
    pub fn for_field(index: &str, field: &str, constraint: IndexConstraint) -> Self {
        let mut index_constraints = BTreeMap::new();
        index_constraints.insert(field.to_string(), constraint);

        Self {
            index: index.to_string(),
            level: LEVEL_INDICES.to_string(),
            body: FieldStatsBody {
                fields: vec![field.to_string()],
                index_constraints,
            },
        }
    }

    /// Constraint attached to a field, if any
    pub fn constraint(&self, field: &str) -> Option<&IndexConstraint> {
        self.body.index_constraints.get(field)
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldStatsBody {
    pub fields: Vec<String>,
    pub index_constraints: BTreeMap<String, IndexConstraint>,
}

/// Per-field constraint; both halves optional, empty means "no filtering"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexConstraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<LowerBound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<UpperBound>,
}

impl IndexConstraint {
    pub fn is_empty(&self) -> bool {
        self.max_value.is_none() && self.min_value.is_none()
    }
}

/// `{ "gte": value }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowerBound {
    pub gte: Value,
}

/// `{ "lte": value }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpperBound {
    pub lte: Value,
}

/// Field statistics response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldStatsResponse {
    #[serde(default)]
    pub indices: IndexStats,
}

impl FieldStatsResponse {
    pub fn new(indices: IndexStats) -> Self {
        Self { indices }
    }
}

/// Per-index statistics in backend order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexStats {
    entries: Vec<(String, IndexFieldStats)>,
}

impl IndexStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: append an index
    pub fn with_index(mut self, name: impl Into<String>, stats: IndexFieldStats) -> Self {
        self.push(name, stats);
        self
    }

    /// Append an index, replacing an earlier entry of the same name in place
    pub fn push(&mut self, name: impl Into<String>, stats: IndexFieldStats) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = stats,
            None => self.entries.push((name, stats)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&IndexFieldStats> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, stats)| stats)
    }

    /// Index names in backend order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexFieldStats)> {
        self.entries.iter().map(|(name, stats)| (name.as_str(), stats))
    }
}

impl<'de> Deserialize<'de> for IndexStats {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(IndexStatsVisitor)
    }
}

struct IndexStatsVisitor;

impl<'de> Visitor<'de> for IndexStatsVisitor {
    type Value = IndexStats;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of index name to field statistics")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut stats = IndexStats {
            entries: Vec::with_capacity(map.size_hint().unwrap_or(0)),
        };
        while let Some((name, raw)) = map.next_entry::<String, Value>()? {
            // Entries without usable field statistics still name an index
            let entry = serde_json::from_value(raw).unwrap_or_default();
            stats.push(name, entry);
        }
        Ok(stats)
    }
}

/// Statistics for the fields of one index
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IndexFieldStats {
    #[serde(default)]
    pub fields: HashMap<String, FieldStats>,
}

impl IndexFieldStats {
    /// Builder method: add one field's statistics
    pub fn field(mut self, name: impl Into<String>, stats: FieldStats) -> Self {
        self.fields.insert(name.into(), stats);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldStats> {
        self.fields.get(field)
    }
}

/// Observed range of one field within one index
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FieldStats {
    #[serde(default)]
    pub min_value: Option<Value>,
    #[serde(default)]
    pub max_value: Option<Value>,
}

impl FieldStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the minimum
    pub fn min(mut self, value: impl Into<Value>) -> Self {
        self.min_value = Some(value.into());
        self
    }

    /// Builder method: set the maximum
    pub fn max(mut self, value: impl Into<Value>) -> Self {
        self.max_value = Some(value.into());
        self
    }
}
