#![deny(unsafe_code)]

use uuid::Uuid;

use crate::ModelError;

/// Length of generated inspector and record identifiers.
pub const ID_LEN: usize = 9;

const MAX_ATTEMPTS: usize = 64;

/// Letter case of a generated identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdCase {
    /// Inspector ids (`3f9c0a7be`).
    Lower,
    /// Record ids, printed on the official document number (`3F9C0A7BE`).
    Upper,
}

/// Generate a short random id that `taken` does not already claim.
///
/// Ids are drawn from a v4 UUID and re-drawn on collision.
pub fn generate_id(case: IdCase, taken: impl Fn(&str) -> bool) -> Result<String, ModelError> {
    for _ in 0..MAX_ATTEMPTS {
        let simple = Uuid::new_v4().simple().to_string();
        let candidate = match case {
            IdCase::Lower => simple[..ID_LEN].to_string(),
            IdCase::Upper => simple[..ID_LEN].to_ascii_uppercase(),
        };
        if !taken(&candidate) {
            return Ok(candidate);
        }
    }
    Err(ModelError::IdExhausted {
        attempts: MAX_ATTEMPTS,
    })
}
