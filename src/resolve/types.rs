//! Resolution inputs and outputs
//!
//! - `TimeBound`: one end of the requested time range
//! - `SortOrder`: requested ordering of the resolved indices
//! - `IndexList`: what resolution hands back to the caller

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// One end of a time range
///
/// Instants are sent to the backend as epoch milliseconds; raw values are
/// passed through exactly as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeBound {
    /// A calendar instant
    Instant(DateTime<Utc>),
    /// A raw scalar (epoch millis number, numeric string, date string...)
    Raw(Value),
}

impl TimeBound {
    pub fn instant(at: DateTime<Utc>) -> Self {
        TimeBound::Instant(at)
    }

    pub fn raw(value: impl Into<Value>) -> Self {
        TimeBound::Raw(value.into())
    }

    /// Value to place in a backend constraint
    pub fn to_constraint_value(&self) -> Value {
        match self {
            TimeBound::Instant(at) => Value::from(at.timestamp_millis()),
            TimeBound::Raw(value) => value.clone(),
        }
    }

    /// Interpret the bound as an instant
    ///
    /// Raw numbers and integer strings are epoch milliseconds; other strings
    /// must be RFC 3339.
    pub fn to_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            TimeBound::Instant(at) => Some(*at),
            TimeBound::Raw(Value::Number(n)) => {
                let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
                Utc.timestamp_millis_opt(millis).single()
            }
            TimeBound::Raw(Value::String(s)) => {
                let s = s.trim();
                match s.parse::<i64>() {
                    Ok(millis) => Utc.timestamp_millis_opt(millis).single(),
                    Err(_) => DateTime::parse_from_rfc3339(s)
                        .ok()
                        .map(|dt| dt.with_timezone(&Utc)),
                }
            }
            TimeBound::Raw(_) => None,
        }
    }
}

impl From<DateTime<Utc>> for TimeBound {
    fn from(at: DateTime<Utc>) -> Self {
        TimeBound::Instant(at)
    }
}

impl std::fmt::Display for TimeBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeBound::Instant(at) => write!(f, "{}", at.to_rfc3339()),
            TimeBound::Raw(value) => write!(f, "{}", value),
        }
    }
}

/// Ordering of resolved indices by their time statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest data first (by `min_value`)
    Asc,
    /// Newest data first (by `max_value`)
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(format!("Invalid sort order '{}': expected asc or desc", other)),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// Result of resolving an index pattern
///
/// `Single` is the literal pattern id, handed to the backend as is. `Many`
/// is an explicit list; an empty list means no index holds data in range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexList {
    Single(String),
    Many(Vec<String>),
}

impl IndexList {
    pub fn is_single(&self) -> bool {
        matches!(self, IndexList::Single(_))
    }

    /// Number of index names
    pub fn len(&self) -> usize {
        match self {
            IndexList::Single(_) => 1,
            IndexList::Many(names) => names.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index names as a list
    pub fn into_vec(self) -> Vec<String> {
        match self {
            IndexList::Single(name) => vec![name],
            IndexList::Many(names) => names,
        }
    }

    /// Comma-joined form accepted by search endpoints
    pub fn to_path(&self) -> String {
        match self {
            IndexList::Single(name) => name.clone(),
            IndexList::Many(names) => names.join(","),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constraint_value_passes_raw_through() {
        let bound = TimeBound::raw("1234567890");
        assert_eq!(bound.to_constraint_value(), json!("1234567890"));
    }

    #[test]
    fn test_constraint_value_uses_millis_for_instants() {
        let at = Utc.with_ymd_and_hms(2015, 9, 22, 0, 0, 0).unwrap();
        let bound = TimeBound::from(at);
        assert_eq!(bound.to_constraint_value(), json!(at.timestamp_millis()));
        assert_eq!(bound.to_constraint_value(), json!(1442880000000i64));
    }

    #[test]
    fn test_to_instant() {
        let at = Utc.with_ymd_and_hms(2015, 9, 22, 0, 0, 0).unwrap();
        assert_eq!(TimeBound::raw(1442880000000i64).to_instant(), Some(at));
        assert_eq!(TimeBound::raw("1442880000000").to_instant(), Some(at));
        assert_eq!(TimeBound::raw("2015-09-22T00:00:00Z").to_instant(), Some(at));
        assert_eq!(TimeBound::raw("yesterday").to_instant(), None);
        assert_eq!(TimeBound::raw(true).to_instant(), None);
    }

    #[test]
    fn test_deserialize_bounds() {
        let bound: TimeBound = serde_json::from_str(r#""2015-09-22T00:00:00Z""#).unwrap();
        assert!(matches!(bound, TimeBound::Instant(_)));

        let bound: TimeBound = serde_json::from_str(r#""1234567890""#).unwrap();
        assert_eq!(bound, TimeBound::raw("1234567890"));

        let bound: TimeBound = serde_json::from_str("42").unwrap();
        assert_eq!(bound, TimeBound::raw(42));
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!("descending".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_index_list_shapes() {
        let single = IndexList::Single("logs".to_string());
        assert!(single.is_single());
        assert_eq!(serde_json::to_value(&single).unwrap(), json!("logs"));

        let many = IndexList::Many(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(many.to_path(), "a,b");
        assert_eq!(serde_json::to_value(&many).unwrap(), json!(["a", "b"]));

        assert!(IndexList::Many(vec![]).is_empty());
    }
}
