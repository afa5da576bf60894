use std::time::Duration;

use anyhow::bail;
use chrono::{NaiveDate, TimeZone, Utc};

use eco_model::{
    BusinessEntity, ChecklistField, Coordinates, FieldType, FormDefinition, FormIcon,
    InspectionRecord, NewInspector, ResponseSet, ResponseValue, Signatures,
};
use eco_report::{
    ChecklistRow, DEFAULT_CONCLUSION, HtmlPrinter, PrintDocument, PrintProvider, PrintSession,
    UNSIGNED, render_html, render_text,
};

const SIGNED: &str = "data:image/png;base64,iVBORw0KGgo=";

fn form() -> FormDefinition {
    FormDefinition {
        id: "6B".into(),
        title: "Pengendalian Pencemaran Air".into(),
        subtitle: String::new(),
        icon: FormIcon::Water,
        fields: vec![
            ChecklistField::new("h1", "Perizinan", FieldType::Header),
            ChecklistField::new("q1", "Memiliki izin pembuangan air limbah", FieldType::Boolean),
            ChecklistField::new("q2", "Melakukan pemantauan harian", FieldType::Boolean),
            ChecklistField::new("q3", "Debit air limbah", FieldType::Text),
            ChecklistField::new("q4", "Titik penaatan", FieldType::Text),
            ChecklistField::new("notes", "Catatan Pengawas", FieldType::Textarea),
        ],
    }
}

fn record() -> InspectionRecord {
    let inspector = NewInspector::new("Budi Santoso", "198701012010011001")
        .with_job_title("PPLH Ahli Muda")
        .into_inspector("k3j9x0ab".into())
        .unwrap();

    let mut business = BusinessEntity::default();
    business.name = "Hijau Lestari".into();
    business.sector_code = "20111".into();
    business.address = "Jl. Industri No. 5, Bekasi".into();
    business.inspection_date = "2024-08-05".into();

    let mut responses = ResponseSet::new();
    responses.set("q1", ResponseValue::Boolean(true));
    responses.set("q2", ResponseValue::Boolean(false));
    responses.set("q3", ResponseValue::Text("12 m3/hari".into()));
    responses.set("q4", ResponseValue::Text(String::new()));

    InspectionRecord {
        id: "K3J9X0AB".into(),
        inspector,
        business,
        form_id: "6B".into(),
        form_title: "Pengendalian Pencemaran Air".into(),
        responses,
        notes: String::new(),
        photos: Vec::new(),
        signatures: Signatures {
            inspector: SIGNED.into(),
            responsible: String::new(),
        },
        created_at: Utc.with_ymd_and_hms(2024, 8, 5, 3, 0, 0).unwrap(),
    }
}

fn printed_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
}

#[test]
fn number_uses_print_year() {
    let doc = PrintDocument::project(&record(), Some(&form()), printed_on());
    insta::assert_snapshot!(doc.number, @"Nomor: K3J9X0AB/BA-PPLH/2025");
}

#[test]
fn opening_names_inspection_date_and_company() {
    let doc = PrintDocument::project(&record(), Some(&form()), printed_on());
    assert!(doc.opening.starts_with("Pada hari ini, tanggal 5 bulan Agustus tahun 2024"));
    assert!(doc.opening.contains("PT. HIJAU LESTARI"));
}

#[test]
fn identity_falls_back_to_manual_input_without_gps() {
    let mut record = record();
    let doc = PrintDocument::project(&record, Some(&form()), printed_on());
    let location = doc
        .identity
        .iter()
        .find(|row| row.label == "Koordinat Lokasi (GPS)")
        .unwrap();
    assert_eq!(location.value, "Manual Input");

    record
        .business
        .set_coordinates(Coordinates::new(-6.2, 106.8));
    let doc = PrintDocument::project(&record, Some(&form()), printed_on());
    assert!(
        doc.identity
            .iter()
            .any(|row| row.value == "-6.2, 106.8")
    );
}

#[test]
fn checklist_follows_form_order() {
    let doc = PrintDocument::project(&record(), Some(&form()), printed_on());
    assert_eq!(doc.checklist_heading, "II. HASIL VERIFIKASI LAPANGAN (FORM 6B)");
    assert_eq!(
        doc.checklist[0],
        ChecklistRow::Section {
            label: "Perizinan".into()
        }
    );
    assert_eq!(
        doc.checklist[1],
        ChecklistRow::Item {
            number: 2,
            label: "Memiliki izin pembuangan air limbah".into(),
            answer: Some(true),
            remark: "-".into(),
        }
    );
    let ChecklistRow::Item { answer, .. } = &doc.checklist[2] else {
        panic!("expected an item row");
    };
    assert_eq!(*answer, Some(false));
    let ChecklistRow::Item { remark, .. } = &doc.checklist[3] else {
        panic!("expected an item row");
    };
    assert_eq!(remark, "12 m3/hari");
    let ChecklistRow::Item { remark, .. } = &doc.checklist[4] else {
        panic!("expected an item row");
    };
    assert_eq!(remark, "");
    let ChecklistRow::Item { answer, remark, .. } = &doc.checklist[5] else {
        panic!("expected an item row");
    };
    assert_eq!(*answer, None);
    assert_eq!(remark, "-");
}

#[test]
fn checklist_without_form_uses_recorded_answers() {
    let doc = PrintDocument::project(&record(), None, printed_on());
    assert_eq!(doc.checklist.len(), 4);
    assert!(matches!(
        &doc.checklist[0],
        ChecklistRow::Item { number: 1, label, .. } if label == "q1"
    ));
}

#[test]
fn blank_notes_print_default_conclusion() {
    let mut record = record();
    record.notes = "   ".into();
    let doc = PrintDocument::project(&record, Some(&form()), printed_on());
    assert_eq!(doc.conclusion, DEFAULT_CONCLUSION);

    record.notes = "IPAL tidak beroperasi.".into();
    let doc = PrintDocument::project(&record, Some(&form()), printed_on());
    assert_eq!(doc.conclusion, "IPAL tidak beroperasi.");
}

#[test]
fn signature_blocks_use_placeholders() {
    let doc = PrintDocument::project(&record(), Some(&form()), printed_on());
    let [inspector, responsible] = &doc.signatures;
    assert_eq!(inspector.image.as_deref(), Some(SIGNED));
    assert_eq!(inspector.detail, "NIP. 198701012010011001");
    assert_eq!(responsible.image, None);
    assert_eq!(responsible.name, "...........................");
    assert_eq!(responsible.detail, "Pihak Penanggung Jawab");
}

#[test]
fn html_embeds_layout_and_images() {
    let mut record = record();
    record.photos = vec!["data:image/jpeg;base64,/9j/".into()];
    let doc = PrintDocument::project(&record, Some(&form()), printed_on());
    let html = render_html(&doc).unwrap();

    assert!(html.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(html.contains("<body id=\"printable-ba\">"));
    assert!(html.contains("Nomor: K3J9X0AB/BA-PPLH/2025"));
    assert!(html.contains("I. DATA UMUM &amp; IDENTITAS"));
    assert!(html.contains("<td colspan=\"5\">Perizinan</td>"));
    assert!(html.contains(&format!("src=\"{SIGNED}\"")));
    assert!(html.contains("Gambar #1: Kondisi Lapangan"));
    assert!(html.contains(UNSIGNED));
}

#[test]
fn text_preview_lists_answers() {
    let doc = PrintDocument::project(&record(), Some(&form()), printed_on());
    let text = render_text(&doc);
    assert!(text.contains("BERITA ACARA"));
    assert!(text.contains("PERIZINAN"));
    assert!(text.contains("12 m3/hari"));
    assert!(text.contains(UNSIGNED));
    assert!(!text.contains("LAMPIRAN FOTO DOKUMENTASI"));
}

#[derive(Default)]
struct Failing {
    seen: Vec<String>,
}

impl PrintProvider for Failing {
    async fn print(&mut self, document: &PrintDocument) -> anyhow::Result<()> {
        self.seen.push(document.record_id.clone());
        bail!("printer offline")
    }
}

#[tokio::test(start_paused = true)]
async fn failed_print_clears_view() {
    let mut session = PrintSession::new(Failing::default());
    let started = tokio::time::Instant::now();

    let result = session
        .print_record(&record(), Some(&form()), printed_on())
        .await;

    assert!(result.is_err());
    assert!(session.active().is_none());
    assert!(started.elapsed() >= Duration::from_millis(500));
    assert_eq!(session.provider().seen, vec!["K3J9X0AB".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn html_printer_writes_document() {
    let mut session = PrintSession::with_delay(HtmlPrinter::new(Vec::new()), Duration::ZERO);
    session
        .print_record(&record(), Some(&form()), printed_on())
        .await
        .unwrap();
    assert!(session.active().is_none());

    let html = String::from_utf8(session.into_provider().into_inner()).unwrap();
    assert!(html.contains("PENGAWASAN LINGKUNGAN HIDUP"));
}
