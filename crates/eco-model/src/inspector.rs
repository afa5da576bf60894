use serde::{Deserialize, Serialize};

use crate::ModelError;

/// A supervising environmental official (Pejabat Pengawas Lingkungan Hidup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inspector {
    pub id: String,
    pub name: String,
    /// Civil servant identification number.
    pub nip: String,
    /// Rank and grade (pangkat/golongan).
    #[serde(rename = "pangkatGol", default)]
    pub rank: String,
    #[serde(rename = "jabatan", default)]
    pub job_title: String,
    #[serde(rename = "noPejabat", default)]
    pub official_number: String,
    #[serde(rename = "instansi", default)]
    pub agency: String,
    /// Reference of the assignment letter (surat tugas).
    #[serde(rename = "suratTugas", default)]
    pub assignment_letter_ref: String,
}

/// Inspector fields as entered in the directory form, before an id is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewInspector {
    pub name: String,
    pub nip: String,
    pub rank: String,
    pub job_title: String,
    pub official_number: String,
    pub agency: String,
    pub assignment_letter_ref: String,
}

impl NewInspector {
    pub fn new(name: impl Into<String>, nip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nip: nip.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_job_title(mut self, job_title: impl Into<String>) -> Self {
        self.job_title = job_title.into();
        self
    }

    /// Attach an id, trimming the name. The name is the only required field.
    pub fn into_inspector(self, id: String) -> Result<Inspector, ModelError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ModelError::MissingField("name"));
        }
        Ok(Inspector {
            id,
            name,
            nip: self.nip.trim().to_string(),
            rank: self.rank,
            job_title: self.job_title,
            official_number: self.official_number,
            agency: self.agency,
            assignment_letter_ref: self.assignment_letter_ref,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_a_name() {
        let err = NewInspector::new("   ", "1").into_inspector("abc".into());
        assert_eq!(err, Err(ModelError::MissingField("name")));
    }

    #[test]
    fn serialized_keys_match_snapshot_format() {
        let inspector = NewInspector::new(" Budi ", "12345")
            .with_job_title("PPLH Ahli Muda")
            .into_inspector("k3x9q0a7b".into())
            .unwrap();
        assert_eq!(inspector.name, "Budi");
        let json = serde_json::to_value(&inspector).unwrap();
        assert_eq!(json["jabatan"], "PPLH Ahli Muda");
        assert_eq!(json["nip"], "12345");
        assert!(json.get("pangkatGol").is_some());
    }
}
