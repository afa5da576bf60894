#![deny(unsafe_code)]

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to parse form catalog: {source}")]
    Toml {
        #[source]
        source: toml::de::Error,
    },

    #[error("duplicate form id in catalog: {form_id}")]
    DuplicateForm { form_id: String },

    #[error("duplicate field id {field_id} in form {form_id}")]
    DuplicateField { form_id: String, field_id: String },

    #[error("form {form_id} has no fields")]
    EmptyForm { form_id: String },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
