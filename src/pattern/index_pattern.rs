//! Index Pattern
//!
//! The user-facing pattern: an id (literal index, wildcard, or rollover
//! template), an optional time field, an optional rollover interval, and the
//! pattern's fields.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::pattern::error::{PatternError, PatternResult};
use crate::pattern::field::{Field, FieldCollection};

/// Character that makes a pattern id match many indices
pub const WILDCARD: char = '*';

/// Source of mapped fields for an index pattern
#[async_trait]
pub trait FieldMapper: Send + Sync {
    /// Current mapped (non-scripted) fields of the indices behind `pattern_id`
    async fn fields_for_pattern(&self, pattern_id: &str) -> PatternResult<Vec<Field>>;
}

/// An index pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexPattern {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_field_name: Option<String>,
    /// Rollover interval name (e.g. "days"); validated at resolution time
    #[serde(default, rename = "interval", skip_serializing_if = "Option::is_none")]
    pub interval_name: Option<String>,
    #[serde(default)]
    pub fields: FieldCollection,
}

impl IndexPattern {
    /// Create a pattern with no time field, interval or fields
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            time_field_name: None,
            interval_name: None,
            fields: FieldCollection::new(),
        }
    }

    /// Builder method: set the time field
    pub fn time_field(mut self, name: impl Into<String>) -> Self {
        self.time_field_name = Some(name.into());
        self
    }

    /// Builder method: set the rollover interval
    pub fn interval(mut self, name: impl Into<String>) -> Self {
        self.interval_name = Some(name.into());
        self
    }

    /// Builder method: set the fields
    pub fn fields(mut self, fields: impl Into<FieldCollection>) -> Self {
        self.fields = fields.into();
        self
    }

    /// Backwards-compatible alias of the id
    pub fn index_name(&self) -> &str {
        &self.id
    }

    /// Rollover interval, if the pattern declares a non-empty one
    pub fn get_interval(&self) -> Option<&str> {
        self.interval_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// True iff a time field is configured and still exists in the fields
    pub fn has_time_field(&self) -> bool {
        self.time_field_name
            .as_deref()
            .map(|name| self.fields.contains(name))
            .unwrap_or(false)
    }

    /// True iff the id contains the wildcard character
    pub fn is_wildcard(&self) -> bool {
        self.id.contains(WILDCARD)
    }

    /// Scripted fields, in collection order
    pub fn scripted_fields(&self) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.scripted).collect()
    }

    /// Mapped fields, in collection order
    pub fn non_scripted_fields(&self) -> Vec<&Field> {
        self.fields.iter().filter(|f| !f.scripted).collect()
    }

    /// Add a scripted field
    pub fn add_scripted_field(
        &mut self,
        name: &str,
        script: &str,
        field_type: &str,
    ) -> PatternResult<&Field> {
        if !self.fields.push(Field::scripted(name, script, field_type)) {
            return Err(PatternError::DuplicateField(name.to_string()));
        }
        tracing::debug!(pattern = %self.id, field = name, "Added scripted field");
        self.fields
            .get(name)
            .ok_or_else(|| PatternError::FieldNotFound(name.to_string()))
    }

    /// Remove a scripted field by name
    pub fn remove_scripted_field(&mut self, name: &str) -> PatternResult<Field> {
        match self.fields.get(name) {
            None => return Err(PatternError::FieldNotFound(name.to_string())),
            Some(field) if !field.scripted => {
                return Err(PatternError::NotScripted(name.to_string()))
            }
            Some(_) => {}
        }
        self.fields
            .remove(name)
            .ok_or_else(|| PatternError::FieldNotFound(name.to_string()))
    }

    /// Adjust a field's popularity by `delta`, never going below zero
    ///
    /// Returns the new count.
    pub fn popularize_field(&mut self, name: &str, delta: i64) -> PatternResult<u64> {
        let field = self
            .fields
            .get_mut(name)
            .ok_or_else(|| PatternError::FieldNotFound(name.to_string()))?;

        field.count = if delta >= 0 {
            field.count.saturating_add(delta as u64)
        } else {
            field.count.saturating_sub(delta.unsigned_abs())
        };
        Ok(field.count)
    }

    /// Reload mapped fields from the mapper, keeping scripted fields
    ///
    /// Scripted fields are appended after the mapped ones; a scripted field
    /// whose name is now mapped is dropped.
    pub async fn refresh_fields(&mut self, mapper: &dyn FieldMapper) -> PatternResult<()> {
        let mapped = mapper.fields_for_pattern(&self.id).await?;
        let scripted: Vec<Field> = self.scripted_fields().into_iter().cloned().collect();

        let mut fields = FieldCollection::new();
        for field in mapped.into_iter().filter(|f| !f.scripted) {
            fields.push(field);
        }
        for field in scripted {
            if !fields.push(field.clone()) {
                tracing::warn!(
                    pattern = %self.id,
                    field = %field.name,
                    "Scripted field shadowed by mapped field, dropping"
                );
            }
        }

        tracing::debug!(pattern = %self.id, fields = fields.len(), "Refreshed fields");
        self.fields = fields;
        Ok(())
    }
}

impl std::fmt::Display for IndexPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
