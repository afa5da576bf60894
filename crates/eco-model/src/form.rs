//! Checklist form schema.

use serde::{Deserialize, Serialize};

use crate::ResponseValue;

/// Kind of a checklist field. Drives both rendering and response validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Yes/no question, tri-state while unanswered.
    Boolean,
    /// Single-line text.
    Text,
    /// Multi-line text.
    Textarea,
    /// Tabular answer, captured as text.
    Table,
    /// Section header; takes no answer.
    Header,
}

impl FieldType {
    /// Check whether `value` is a valid answer for a field of this type.
    ///
    /// `Unset` is accepted everywhere except on headers, which never hold
    /// an answer at all.
    pub fn accepts(&self, value: &ResponseValue) -> bool {
        match (self, value) {
            (Self::Header, _) => false,
            (_, ResponseValue::Unset) => true,
            (Self::Boolean, ResponseValue::Boolean(_)) => true,
            (Self::Text | Self::Textarea | Self::Table, ResponseValue::Text(_)) => true,
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Table => "table",
            Self::Header => "header",
        }
    }
}

/// Icon identifier for a form. Presentation code decides what it looks like.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormIcon {
    #[default]
    Document,
    Water,
    Air,
    Chemical,
    HazardousWaste,
    SolidWaste,
    Trash,
}

/// One question or item of a checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Column headings, for `table` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    /// Row headings, for `table` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<String>,
}

impl ChecklistField {
    pub fn new(id: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field_type,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

/// A named, ordered set of checklist fields for one inspection category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub icon: FormIcon,
    pub fields: Vec<ChecklistField>,
}

impl FormDefinition {
    pub fn field(&self, field_id: &str) -> Option<&ChecklistField> {
        self.fields.iter().find(|field| field.id == field_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_acceptance() {
        let yes = ResponseValue::Boolean(true);
        let text = ResponseValue::Text("ada".into());
        assert!(FieldType::Boolean.accepts(&yes));
        assert!(!FieldType::Boolean.accepts(&text));
        assert!(FieldType::Textarea.accepts(&text));
        assert!(FieldType::Table.accepts(&ResponseValue::Unset));
        assert!(!FieldType::Header.accepts(&ResponseValue::Unset));
    }
}
