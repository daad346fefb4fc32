//! Index Patterns
//!
//! The pattern model the resolver reads from:
//!
//! - **IndexPattern**: id, time field, rollover interval, fields
//! - **FieldCollection**: ordered fields with lookup by name
//! - **FieldMapper**: source of mapped fields for `refresh_fields`

mod error;
mod field;
mod index_pattern;

pub use error::{PatternError, PatternResult};
pub use field::{Field, FieldCollection, DEFAULT_SCRIPT_LANG};
pub use index_pattern::{FieldMapper, IndexPattern, WILDCARD};
