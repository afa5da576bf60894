use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Answer to one checklist field.
///
/// Serialized untagged: `true`/`false`, a string, or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Boolean(bool),
    Text(String),
    #[default]
    Unset,
}

impl ResponseValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

static UNSET: ResponseValue = ResponseValue::Unset;

/// Answers keyed by field id. Missing entries read as [`ResponseValue::Unset`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet(BTreeMap<String, ResponseValue>);

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field_id: &str) -> &ResponseValue {
        self.0.get(field_id).unwrap_or(&UNSET)
    }

    /// Store an answer. Setting `Unset` removes the entry.
    pub fn set(&mut self, field_id: impl Into<String>, value: ResponseValue) {
        let field_id = field_id.into();
        if value.is_unset() {
            self.0.remove(&field_id);
        } else {
            self.0.insert(field_id, value);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResponseValue)> {
        self.0.iter().map(|(id, value)| (id.as_str(), value))
    }
}
