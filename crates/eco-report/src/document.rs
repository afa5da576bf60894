//! Print projection of an inspection record.
//!
//! [`PrintDocument`] is the record laid out as the official "Berita Acara
//! Pengawasan Lingkungan Hidup" (PermenLHK No. 14/2024, Lampiran IV). It is a
//! pure function of the record, its form definition and the print date;
//! renderers only decide how it looks.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use eco_model::{FieldType, FormDefinition, InspectionRecord, ResponseValue};

use crate::dates;

pub const REGULATION_HEADER: [&str; 3] = [
    "LAMPIRAN IV PERATURAN MENTERI LINGKUNGAN HIDUP DAN KEHUTANAN REPUBLIK INDONESIA",
    "NOMOR 14 TAHUN 2024",
    "Tentang Tata Cara Pengawasan Lingkungan Hidup Berdasarkan PP No. 22 Tahun 2021",
];

pub const TITLE: [&str; 2] = ["BERITA ACARA", "PENGAWASAN LINGKUNGAN HIDUP"];

pub const IDENTITY_HEADING: &str = "I. DATA UMUM & IDENTITAS";
pub const CONCLUSION_HEADING: &str = "III. KESIMPULAN & EVALUASI PENGAWAS";
pub const PHOTOS_HEADING: &str = "LAMPIRAN FOTO DOKUMENTASI";
pub const CHECKLIST_COLUMNS: [&str; 5] = [
    "NO",
    "KETENTUAN / KRITERIA PEMERIKSAAN",
    "YA",
    "TDK",
    "KETERANGAN / TEMUAN",
];

pub const DEFAULT_CONCLUSION: &str = "Pengawasan dilakukan secara menyeluruh sesuai dengan daftar \
periksa. Penanggung jawab usaha kooperatif dalam memberikan data dan akses lapangan.";

pub const UNSIGNED: &str = "BELUM TANDA TANGAN";

pub const FOOTER: &str = "Dokumen Berita Acara ini diterbitkan secara elektronik melalui \
EcoInspect Pro dan memiliki kekuatan hukum yang sah sesuai dengan ketentuan peraturan \
perundang-undangan di bidang Lingkungan Hidup.";

/// Mark printed in the YA / TDK columns.
pub const CHECK_MARK: &str = "V";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChecklistRow {
    /// Header field, spanning the whole table.
    Section { label: String },
    Item {
        /// 1-based position among all fields of the form, headers included.
        number: usize,
        label: String,
        /// `Some(true)` marks YA, `Some(false)` marks TDK.
        answer: Option<bool>,
        remark: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignatureBlock {
    pub party: &'static str,
    pub role: &'static str,
    /// Image payload; `None` prints the unsigned placeholder.
    pub image: Option<String>,
    pub name: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintDocument {
    pub record_id: String,
    /// `Nomor: <ID>/BA-PPLH/<year>`.
    pub number: String,
    pub opening: String,
    pub identity: Vec<IdentityRow>,
    pub checklist_heading: String,
    pub checklist: Vec<ChecklistRow>,
    pub conclusion: String,
    pub photos: Vec<String>,
    pub signatures: [SignatureBlock; 2],
}

impl PrintDocument {
    /// Lay out `record` for printing on `printed_on`.
    ///
    /// `form` should be the catalog definition of `record.form_id`. Without
    /// it, the checklist falls back to the recorded answers keyed by field id.
    pub fn project(
        record: &InspectionRecord,
        form: Option<&FormDefinition>,
        printed_on: NaiveDate,
    ) -> Self {
        let business = &record.business;
        let inspector = &record.inspector;
        let company = format!("PT. {}", business.name.to_uppercase());

        let inspection_date = NaiveDate::parse_from_str(&business.inspection_date, "%Y-%m-%d")
            .unwrap_or_else(|_| record.created_at.date_naive());
        let opening = format!(
            "Pada hari ini, tanggal {} bulan {} tahun {}, bertempat di lokasi {}, telah \
             dilakukan pengawasan ketaatan lingkungan hidup sebagaimana diatur dalam Pasal 493 \
             Peraturan Pemerintah No. 22 Tahun 2021, dengan rincian sebagai berikut:",
            inspection_date.day(),
            dates::month_name(inspection_date),
            inspection_date.year(),
            company,
        );

        let coordinates = match business.coordinates() {
            Some(c) => format!("{}, {}", c.latitude, c.longitude),
            None => "Manual Input".to_string(),
        };
        let identity = vec![
            row("Nama Pejabat Pengawas", inspector.name.clone()),
            row(
                "NIP / Jabatan",
                format!("{} / {}", inspector.nip, inspector.job_title),
            ),
            row("Nama Perusahaan", company),
            row("KBLI / Sektor", business.sector_code.clone()),
            row("Koordinat Lokasi (GPS)", coordinates),
            row("Alamat Lengkap", business.address.clone()),
        ];

        let checklist = match form {
            Some(form) => checklist_rows(form, record),
            None => recorded_rows(record),
        };

        let conclusion = if record.notes.trim().is_empty() {
            DEFAULT_CONCLUSION.to_string()
        } else {
            record.notes.clone()
        };

        let signatures = [
            SignatureBlock {
                party: "PIHAK I (KLHK/DINAS),",
                role: "Pejabat Pengawas Lingkungan Hidup",
                image: payload(&record.signatures.inspector),
                name: inspector.name.clone(),
                detail: format!("NIP. {}", inspector.nip),
            },
            SignatureBlock {
                party: "PIHAK II (USAHA),",
                role: "Penanggung Jawab Usaha/Kegiatan",
                image: payload(&record.signatures.responsible),
                name: non_empty_or(&business.responsible_person, "..........................."),
                detail: non_empty_or(&business.responsible_title, "Pihak Penanggung Jawab"),
            },
        ];

        Self {
            record_id: record.id.clone(),
            number: format!(
                "Nomor: {}/BA-PPLH/{}",
                record.id.to_uppercase(),
                printed_on.year()
            ),
            opening,
            identity,
            checklist_heading: format!(
                "II. HASIL VERIFIKASI LAPANGAN (FORM {})",
                record.form_id
            ),
            checklist,
            conclusion,
            photos: record.photos.clone(),
            signatures,
        }
    }

    /// Caption under the photo at `index`.
    pub fn photo_caption(index: usize) -> String {
        format!("Gambar #{}: Kondisi Lapangan", index + 1)
    }
}

fn row(label: &'static str, value: String) -> IdentityRow {
    IdentityRow { label, value }
}

fn payload(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

fn item(number: usize, label: String, value: &ResponseValue) -> ChecklistRow {
    ChecklistRow::Item {
        number,
        label,
        answer: value.as_bool(),
        remark: value.as_text().unwrap_or("-").to_string(),
    }
}

fn checklist_rows(form: &FormDefinition, record: &InspectionRecord) -> Vec<ChecklistRow> {
    form.fields
        .iter()
        .enumerate()
        .map(|(idx, field)| match field.field_type {
            FieldType::Header => ChecklistRow::Section {
                label: field.label.clone(),
            },
            _ => item(idx + 1, field.label.clone(), record.responses.get(&field.id)),
        })
        .collect()
}

fn recorded_rows(record: &InspectionRecord) -> Vec<ChecklistRow> {
    record
        .responses
        .iter()
        .enumerate()
        .map(|(idx, (field_id, value))| item(idx + 1, field_id.to_string(), value))
        .collect()
}
