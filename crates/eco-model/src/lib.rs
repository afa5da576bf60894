//! Data model for environmental compliance inspections.
//!
//! The types here are shared by every other crate in the workspace:
//!
//! - [`Inspector`]: the supervising official who signs the record
//! - [`BusinessEntity`]: the inspected business, captured per session
//! - [`FormDefinition`] / [`ChecklistField`]: static checklist schema
//! - [`ResponseValue`] / [`ResponseSet`]: typed answers keyed by field id
//! - [`InspectionRecord`]: the immutable artifact of a finished inspection
//!
//! Serialized field names follow the snapshot format used by the local
//! store, so existing snapshots round-trip unchanged.

pub mod business;
pub mod error;
pub mod form;
pub mod ids;
pub mod inspector;
pub mod record;
pub mod response;
pub mod user;

pub use business::{BusinessEntity, CapitalStatus, Coordinates};
pub use error::{ModelError, Result};
pub use form::{ChecklistField, FieldType, FormDefinition, FormIcon};
pub use ids::{IdCase, generate_id};
pub use inspector::{Inspector, NewInspector};
pub use record::{InspectionRecord, SignatureParty, Signatures};
pub use response::{ResponseSet, ResponseValue};
pub use user::User;
