//! Embedded catalog data.
//!
//! Forms are embedded at compile time using `include_str!()`, so the catalog
//! needs no runtime file I/O.

/// Checklist forms 6A–6G, TOML.
pub const FORMS_TOML: &str = include_str!("../data/forms.toml");
