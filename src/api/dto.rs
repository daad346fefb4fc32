//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::pattern::{Field, IndexPattern};
use crate::resolve::{IndexList, SortOrder, TimeBound};

// ============================================
// PATTERN DTOs
// ============================================

/// Summary of a pattern in list responses
#[derive(Debug, Serialize, Deserialize)]
pub struct PatternSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_field_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    /// Resolution strategy: "interval", "field_stats" or "literal"
    pub strategy: String,
    pub field_count: usize,
    pub scripted_field_count: usize,
}

/// List patterns response
#[derive(Debug, Serialize, Deserialize)]
pub struct ListPatternsResponse {
    pub patterns: Vec<PatternSummary>,
    pub total: usize,
}

/// Single pattern response
#[derive(Debug, Serialize, Deserialize)]
pub struct PatternResponse {
    pub strategy: String,
    #[serde(flatten)]
    pub pattern: IndexPattern,
}

// ============================================
// RESOLVE DTOs
// ============================================

/// Resolve request
///
/// Bounds are RFC 3339 strings, epoch millis, or any raw value the backend
/// understands. An RFC 3339 string is read as an instant and reaches the
/// backend as epoch millis; every other value is forwarded exactly as sent.
/// Quote a value the way the backend expects (e.g. `"1442880000000"`) to
/// keep it raw.
#[derive(Debug, Default, Deserialize)]
pub struct ResolveRequest {
    #[serde(default)]
    pub start: Option<TimeBound>,
    #[serde(default)]
    pub stop: Option<TimeBound>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
}

/// Resolve response
#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub pattern: String,
    pub strategy: String,
    /// A single name for literal patterns, otherwise a list
    pub indices: IndexList,
}

// ============================================
// FIELD DTOs
// ============================================

/// Add a scripted field
#[derive(Debug, Deserialize)]
pub struct ScriptedFieldRequest {
    pub name: String,
    pub script: String,
    #[serde(rename = "type", default = "default_scripted_type")]
    pub field_type: String,
}

fn default_scripted_type() -> String {
    "number".to_string()
}

/// Field response
#[derive(Debug, Serialize, Deserialize)]
pub struct FieldResponse {
    pub pattern: String,
    pub field: Field,
}

/// Popularize request
#[derive(Debug, Deserialize)]
pub struct PopularizeRequest {
    #[serde(default = "default_delta")]
    pub delta: i64,
}

fn default_delta() -> i64 {
    1
}

impl Default for PopularizeRequest {
    fn default() -> Self {
        Self {
            delta: default_delta(),
        }
    }
}

/// Popularize response
#[derive(Debug, Serialize, Deserialize)]
pub struct PopularizeResponse {
    pub field: String,
    pub count: u64,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub patterns: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
