use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BusinessEntity, Inspector, ResponseSet};

/// Which party a signature belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureParty {
    /// Pihak I, the supervising official.
    Inspector,
    /// Pihak II, the person responsible for the business.
    Responsible,
}

impl SignatureParty {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inspector => "inspector",
            Self::Responsible => "responsible person",
        }
    }
}

/// Encoded signature images. An empty string means "not signed".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signatures {
    pub inspector: String,
    pub responsible: String,
}

impl Signatures {
    pub fn get(&self, party: SignatureParty) -> &str {
        match party {
            SignatureParty::Inspector => &self.inspector,
            SignatureParty::Responsible => &self.responsible,
        }
    }

    pub fn set(&mut self, party: SignatureParty, payload: String) {
        match party {
            SignatureParty::Inspector => self.inspector = payload,
            SignatureParty::Responsible => self.responsible = payload,
        }
    }

    /// First party whose signature is still missing.
    pub fn missing(&self) -> Option<SignatureParty> {
        if self.inspector.is_empty() {
            Some(SignatureParty::Inspector)
        } else if self.responsible.is_empty() {
            Some(SignatureParty::Responsible)
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_none()
    }
}

/// The finished, immutable artifact of one inspection session.
///
/// Inspector and business are embedded snapshots, so later directory edits
/// never change a stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionRecord {
    pub id: String,
    pub inspector: Inspector,
    pub business: BusinessEntity,
    pub form_id: String,
    pub form_title: String,
    pub responses: ResponseSet,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub photos: Vec<String>,
    pub signatures: Signatures,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_signature_reports_first_party() {
        let mut signatures = Signatures::default();
        assert_eq!(signatures.missing(), Some(SignatureParty::Inspector));
        signatures.set(SignatureParty::Inspector, "data:image/png;base64,AA".into());
        assert_eq!(signatures.missing(), Some(SignatureParty::Responsible));
        signatures.set(SignatureParty::Responsible, "data:image/png;base64,AA".into());
        assert!(signatures.is_complete());
    }
}
