//! Checklist form catalog.
//!
//! The catalog is pure data: form ids, titles, ordered field lists and field
//! types, plus a [`FormIcon`](eco_model::FormIcon) identifier. It is embedded
//! at compile time from `data/forms.toml` and is read-only at runtime.
//!
//! # Example
//!
//! ```rust,ignore
//! use eco_catalog::FormCatalog;
//!
//! let catalog = FormCatalog::load_embedded()?;
//! let form = catalog.find("6B").unwrap();
//! println!("{} has {} fields", form.title, form.fields.len());
//! ```

mod catalog;
pub mod embedded;
mod error;

pub use catalog::FormCatalog;
pub use error::{CatalogError, Result};
