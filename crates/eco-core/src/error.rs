//! Error types for the wizard session and its device collaborators.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use eco_model::{FieldType, SignatureParty};
use eco_persistence::PersistenceError;

use crate::wizard::Step;

/// Failure of a single position query.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocationError {
    /// The device has no positioning capability.
    #[error("geolocation is not supported on this device")]
    Unsupported,

    #[error("a location request is already in progress")]
    InProgress,

    #[error("location request timed out after {}s", .after.as_secs())]
    Timeout { after: Duration },

    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Failure to read or decode a media payload.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("not a base64 data URL: {reason}")]
    InvalidDataUrl { reason: &'static str },

    #[error("invalid base64 payload")]
    Base64(#[from] base64::DecodeError),

    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{name} is not a supported image")]
    UnsupportedImage { name: String },

    #[error("image codec error")]
    Image(#[from] image::ImageError),
}

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("signature pad must have a non-zero size (got {width}x{height})")]
    InvalidSize { width: u32, height: u32 },

    #[error(transparent)]
    Media(#[from] MediaError),
}

impl From<image::ImageError> for SignatureError {
    fn from(err: image::ImageError) -> Self {
        Self::Media(MediaError::Image(err))
    }
}

/// Rejected wizard operation. The session is unchanged after any error.
#[derive(Debug, Error)]
pub enum WizardError {
    /// Finalize preconditions that the UI cannot prevent on its own.
    #[error("cannot finalize inspection: {reason}")]
    InvalidSession { reason: String },

    #[error("select an inspector before continuing")]
    InspectorRequired,

    #[error("choose a checklist form before continuing")]
    FormRequired,

    #[error("unknown form: {form_id}")]
    UnknownForm { form_id: String },

    #[error("unknown inspector: {id}")]
    UnknownInspector { id: String },

    #[error("form {form_id} has no field {field_id}")]
    UnknownField { form_id: String, field_id: String },

    #[error("field {field_id} expects a {} answer", .expected.name())]
    ResponseTypeMismatch {
        field_id: String,
        expected: FieldType,
    },

    #[error("{operation} is only available at step {expected} (current step {current})")]
    WrongStep {
        operation: &'static str,
        expected: Step,
        current: Step,
    },

    #[error("cannot move from step {from} to {target}")]
    InvalidTransition { from: Step, target: String },

    #[error("{} signature is required", .party.label())]
    SignatureRequired { party: SignatureParty },

    #[error("the inspection is already being saved")]
    SubmissionInProgress,

    #[error("the inspection session is closed")]
    SessionClosed,

    #[error("photo {index} does not exist ({len} attached)")]
    PhotoIndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl WizardError {
    /// Message suitable for showing to the inspector in the field.
    pub fn user_message(&self) -> String {
        match self {
            Self::Location(LocationError::Unsupported) => {
                "Browser/Perangkat tidak mendukung fitur GPS.".to_string()
            }
            Self::Location(LocationError::InProgress) => {
                "Sedang mengambil koordinat, mohon tunggu.".to_string()
            }
            Self::Location(err) => {
                format!("Gagal mengambil koordinat: {err}. Pastikan izin lokasi aktif.")
            }
            Self::SignatureRequired { party } => match party {
                SignatureParty::Inspector => "Tanda tangan pengawas belum diisi.".to_string(),
                SignatureParty::Responsible => {
                    "Tanda tangan penanggung jawab usaha belum diisi.".to_string()
                }
            },
            Self::InspectorRequired => "Pilih pejabat pengawas terlebih dahulu.".to_string(),
            Self::FormRequired => "Pilih formulir pengawasan terlebih dahulu.".to_string(),
            Self::Persistence(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WizardError>;
