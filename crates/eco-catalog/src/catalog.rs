use std::collections::BTreeSet;

use serde::Deserialize;
use tracing::debug;

use eco_model::FormDefinition;

use crate::embedded::FORMS_TOML;
use crate::error::{CatalogError, Result};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    forms: Vec<FormDefinition>,
}

/// Read-only registry of checklist forms, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct FormCatalog {
    forms: Vec<FormDefinition>,
}

impl FormCatalog {
    /// Load the forms shipped with the application.
    pub fn load_embedded() -> Result<Self> {
        Self::from_toml_str(FORMS_TOML)
    }

    /// Parse and validate a catalog document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|source| CatalogError::Toml { source })?;
        Self::from_forms(file.forms)
    }

    /// Build a catalog from form definitions.
    ///
    /// Form ids must be unique, every form needs at least one field, and
    /// field ids must be unique within their form.
    pub fn from_forms(forms: Vec<FormDefinition>) -> Result<Self> {
        let mut form_ids = BTreeSet::new();
        for form in &forms {
            if !form_ids.insert(form.id.as_str()) {
                return Err(CatalogError::DuplicateForm {
                    form_id: form.id.clone(),
                });
            }
            if form.fields.is_empty() {
                return Err(CatalogError::EmptyForm {
                    form_id: form.id.clone(),
                });
            }
            let mut field_ids = BTreeSet::new();
            for field in &form.fields {
                if !field_ids.insert(field.id.as_str()) {
                    return Err(CatalogError::DuplicateField {
                        form_id: form.id.clone(),
                        field_id: field.id.clone(),
                    });
                }
            }
        }
        debug!(forms = forms.len(), "loaded form catalog");
        Ok(Self { forms })
    }

    pub fn forms(&self) -> &[FormDefinition] {
        &self.forms
    }

    pub fn find(&self, form_id: &str) -> Option<&FormDefinition> {
        self.forms.iter().find(|form| form.id == form_id)
    }

    pub fn contains(&self, form_id: &str) -> bool {
        self.find(form_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_field_ids() {
        let toml = r#"
            [[forms]]
            id = "X"
            title = "X"
            fields = [
                { id = "a", label = "A", type = "boolean" },
                { id = "a", label = "A again", type = "text" },
            ]
        "#;
        let err = FormCatalog::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateField { ref field_id, .. } if field_id == "a"));
    }

    #[test]
    fn rejects_duplicate_forms() {
        let toml = r#"
            [[forms]]
            id = "X"
            title = "X"
            fields = [{ id = "a", label = "A", type = "boolean" }]

            [[forms]]
            id = "X"
            title = "Y"
            fields = [{ id = "b", label = "B", type = "boolean" }]
        "#;
        assert!(matches!(
            FormCatalog::from_toml_str(toml),
            Err(CatalogError::DuplicateForm { .. })
        ));
    }

    #[test]
    fn rejects_empty_forms_and_unknown_types() {
        let empty = "[[forms]]\nid = \"X\"\ntitle = \"X\"\nfields = []\n";
        assert!(matches!(
            FormCatalog::from_toml_str(empty),
            Err(CatalogError::EmptyForm { .. })
        ));

        let bad_type = r#"
            [[forms]]
            id = "X"
            title = "X"
            fields = [{ id = "a", label = "A", type = "checkbox" }]
        "#;
        assert!(matches!(
            FormCatalog::from_toml_str(bad_type),
            Err(CatalogError::Toml { .. })
        ));
    }
}
