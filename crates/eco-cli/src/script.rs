//! Inspection scripts: one TOML file describing everything an inspector
//! would enter in the wizard.
//!
//! ```toml
//! form = "6B"
//! notes = "IPAL beroperasi normal."
//! photos = ["ipal.jpg"] # relative to the script
//!
//! [inspector]          # either `id = "..."` or the fields of a new inspector
//! name = "Budi"
//! nip = "12345"
//!
//! [business]
//! name = "PT Hijau Lestari"
//! kbli = "20111"
//!
//! [location]           # omit to record "Manual Input"
//! latitude = -6.2
//! longitude = 106.8
//!
//! [responses]
//! "6b_3" = true
//! "6b_notes" = "Debit 12 m3/hari"
//!
//! [signatures.inspector]
//! strokes = [[[10, 10], [80, 40], [150, 20]]]
//!
//! [signatures.responsible]
//! image = "ttd-pj.png"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use eco_model::{BusinessEntity, CapitalStatus, NewInspector, ResponseValue};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InspectionScript {
    /// Form to fill in when the session does not already have one.
    pub form: Option<String>,
    pub inspector: InspectorChoice,
    #[serde(default)]
    pub business: BusinessScript,
    pub location: Option<LocationScript>,
    #[serde(default)]
    pub responses: BTreeMap<String, ResponseValue>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub photos: Vec<PathBuf>,
    #[serde(default)]
    pub signatures: SignaturesScript,
}

/// Step 1: pick an existing inspector or register a new one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InspectorChoice {
    Existing { id: String },
    New(NewInspector),
}

impl Default for InspectorChoice {
    fn default() -> Self {
        Self::New(NewInspector::default())
    }
}

/// Step 2 fields. Absent keys leave the draft value untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BusinessScript {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub business_type: Option<String>,
    pub kbli: Option<String>,
    pub operating_year: Option<String>,
    pub capital_status: Option<String>,
    pub responsible_person: Option<String>,
    pub responsible_title: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl BusinessScript {
    pub fn apply(&self, entity: &mut BusinessEntity) {
        fn set(target: &mut String, value: &Option<String>) {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }
        set(&mut entity.name, &self.name);
        set(&mut entity.business_type, &self.business_type);
        set(&mut entity.sector_code, &self.kbli);
        set(&mut entity.operating_year, &self.operating_year);
        set(&mut entity.responsible_person, &self.responsible_person);
        set(&mut entity.responsible_title, &self.responsible_title);
        set(&mut entity.phone, &self.phone);
        set(&mut entity.address, &self.address);
        set(&mut entity.inspection_date, &self.date);
        set(&mut entity.inspection_time, &self.time);
        if let Some(status) = &self.capital_status {
            entity.capital_status = CapitalStatus::from(status.clone());
        }
    }
}

/// Position the scripted device reports.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationScript {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignaturesScript {
    #[serde(default)]
    pub inspector: SignatureScript,
    #[serde(default)]
    pub responsible: SignatureScript,
}

/// A signature, drawn stroke by stroke on the pad or loaded from an image.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignatureScript {
    /// Pad coordinates, one list of points per stroke.
    #[serde(default)]
    pub strokes: Vec<Vec<[f32; 2]>>,
    pub image: Option<PathBuf>,
}

impl SignatureScript {
    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.strokes.iter().all(Vec::is_empty)
    }
}

impl InspectionScript {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid inspection script")
    }

    /// Read a script file. Relative paths inside it resolve against the
    /// returned base directory.
    pub fn load(path: &Path) -> Result<(Self, PathBuf)> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read inspection script {}", path.display()))?;
        let script = Self::from_toml_str(&content)
            .with_context(|| format!("in {}", path.display()))?;
        let base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok((script, base))
    }
}
