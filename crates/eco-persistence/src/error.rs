//! Persistence error types.
//!
//! All persistence operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::path::PathBuf;

use eco_model::ModelError;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot could not be encoded.
    #[error("Failed to serialize {slot}")]
    Serialization {
        slot: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Login with a blank name.
    #[error("Login name must not be empty")]
    InvalidLogin,

    /// No inspector with this id in the directory.
    #[error("Unknown inspector: {id}")]
    UnknownInspector { id: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl PersistenceError {
    /// Get a user-friendly message for this error, in Indonesian like the
    /// rest of the field UI.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!(
                    "Gagal {} berkas {}.",
                    operation_label(operation),
                    path.display()
                )
            }
            Self::Serialization { slot, .. } => {
                format!("Terjadi kesalahan saat menyimpan {slot}.")
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Gagal menyimpan berkas {}. Periksa ruang disk dan izin akses.",
                    target_path.display()
                )
            }
            Self::InvalidLogin => "Masukkan nama untuk login.".to_string(),
            Self::UnknownInspector { id } => {
                format!("Pejabat pengawas dengan ID '{id}' tidak terdaftar.")
            }
            Self::Model(ModelError::MissingField(field)) => {
                format!("Data pejabat pengawas belum lengkap: {field} wajib diisi.")
            }
            Self::Model(ModelError::IdExhausted { .. }) => {
                "Gagal membuat ID baru. Silakan coba lagi.".to_string()
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Pastikan folder data ada dan dapat dibaca.".into())
                } else {
                    Some("Pastikan Anda memiliki izin menulis ke folder data.".into())
                }
            }
            Self::Serialization { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Kosongkan ruang disk atau gunakan folder data lain.".into())
            }
            Self::InvalidLogin => None,
            Self::UnknownInspector { .. } => {
                Some("Jalankan `ecoinspect inspector list` untuk melihat daftar pejabat.".into())
            }
            Self::Model(_) => None,
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;

fn operation_label(operation: &str) -> &'static str {
    match operation {
        "read" => "membaca",
        "create directory" => "membuat folder untuk",
        "create" => "membuat",
        "write" => "menulis",
        "sync" => "menyinkronkan",
        "remove" => "menghapus",
        _ => "mengakses",
    }
}
