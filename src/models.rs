// src/models.rs

//! Entities returned by the package service
//!
//! Packages, repositories and distributions are kept exactly as the service
//! returned them so structured output can pass them through unchanged. The
//! client only ever reads named fields from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One listed object (package, repository, distribution or release)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(Map<String, Value>);

impl Entity {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw field value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Text of a field, treating null and empty strings as absent
    ///
    /// Numbers and booleans are not text and read as absent too.
    pub fn text(&self, field: &str) -> Option<&str> {
        match self.0.get(field) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// The entity's slug, empty when missing
    pub fn slug(&self) -> &str {
        self.text("slug").unwrap_or_default()
    }

    /// Nested entities stored as an array of objects under `field`
    ///
    /// Non-object array items are skipped.
    pub fn children(&self, field: &str) -> Vec<Entity> {
        match self.0.get(field) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_object().cloned().map(Entity))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Releases (versions) of a distribution
    pub fn releases(&self) -> Vec<Entity> {
        self.children("versions")
    }

    /// Underlying field map
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Entity {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Sort entities by slug, ascending
pub fn sorted_by_slug(entities: &[Entity]) -> Vec<&Entity> {
    let mut sorted: Vec<&Entity> = entities.iter().collect();
    sorted.sort_by(|a, b| a.slug().cmp(b.slug()));
    sorted
}
