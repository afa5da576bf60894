//! Inspection workflow for EcoInspect.
//!
//! The centre of this crate is [`WizardSession`], the state machine that
//! walks an inspector from choosing who is inspecting to a signed, archived
//! record. Around it sit the device collaborators the session talks to:
//!
//! - [`geolocation`]: one-shot GPS capture behind [`LocationProvider`]
//! - [`signature`]: the raster [`SignaturePad`]
//! - [`media`]: data URL payloads and [`PhotoSource`] readers
//! - [`routing`]: screens and the login guard
//!
//! Application data (inspectors, archive, login) is passed in explicitly as
//! an [`eco_persistence::AppState`].

pub mod error;
pub mod geolocation;
pub mod media;
pub mod routing;
pub mod signature;
pub mod wizard;

pub use error::{LocationError, MediaError, Result, SignatureError, WizardError};
pub use geolocation::{FixedLocation, LocationProvider, NoLocation, PositionOptions};
pub use media::{DataUrl, FilePhotoSource, PhotoSource};
pub use routing::{Navigation, Route, resolve};
pub use signature::SignaturePad;
pub use wizard::{EntryContext, Phase, PhotoBatch, Step, WizardSession};
