//! Index pattern fields
//!
//! A field is either mapped (read from stored data) or scripted (computed by
//! the backend at query time). [`FieldCollection`] keeps fields in insertion
//! order with O(1) lookup by name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Script language assigned to new scripted fields
pub const DEFAULT_SCRIPT_LANG: &str = "expression";

/// A single field of an index pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    #[serde(default)]
    pub scripted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Popularity counter
    #[serde(default)]
    pub count: u64,
    #[serde(default = "default_true")]
    pub searchable: bool,
    #[serde(default = "default_true")]
    pub aggregatable: bool,
}

fn default_field_type() -> String {
    "string".to_string()
}

fn default_true() -> bool {
    true
}

impl Field {
    /// Create a mapped field
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            scripted: false,
            script: None,
            lang: None,
            count: 0,
            searchable: true,
            aggregatable: true,
        }
    }

    /// Create a scripted field
    pub fn scripted(
        name: impl Into<String>,
        script: impl Into<String>,
        field_type: impl Into<String>,
    ) -> Self {
        Self {
            scripted: true,
            script: Some(script.into()),
            lang: Some(DEFAULT_SCRIPT_LANG.to_string()),
            ..Self::new(name, field_type)
        }
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }
}

/// Ordered field list with lookup by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Field>", into = "Vec<Field>")]
pub struct FieldCollection {
    fields: Vec<Field>,
    by_name: HashMap<String, usize>,
}

impl FieldCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field; returns false and leaves the collection unchanged
    /// when the name is already taken
    pub fn push(&mut self, field: Field) -> bool {
        if self.by_name.contains_key(&field.name) {
            return false;
        }
        self.by_name.insert(field.name.clone(), self.fields.len());
        self.fields.push(field);
        true
    }

    /// Remove a field by name
    pub fn remove(&mut self, name: &str) -> Option<Field> {
        let idx = self.by_name.remove(name)?;
        let field = self.fields.remove(idx);
        self.reindex();
        Some(field)
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Field> {
        let idx = *self.by_name.get(name)?;
        self.fields.get_mut(idx)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Field> {
        self.fields.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in order
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    fn reindex(&mut self) {
        self.by_name = self
            .fields
            .iter()
            .enumerate()
            .map(|(idx, f)| (f.name.clone(), idx))
            .collect();
    }
}

impl From<Vec<Field>> for FieldCollection {
    /// Later duplicates are dropped
    fn from(fields: Vec<Field>) -> Self {
        let mut collection = Self::new();
        for field in fields {
            collection.push(field);
        }
        collection
    }
}

impl From<FieldCollection> for Vec<Field> {
    fn from(collection: FieldCollection) -> Self {
        collection.fields
    }
}

impl<'a> IntoIterator for &'a FieldCollection {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
