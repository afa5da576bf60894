//! Scripted inspections against an in-memory store.

use std::fs;
use std::path::Path;
use std::time::Duration;

use indicatif::ProgressBar;

use eco_catalog::FormCatalog;
use eco_cli::inspect::{RunOptions, run_script};
use eco_cli::listing::{HistoryRow, write_history_csv};
use eco_cli::script::InspectionScript;
use eco_core::EntryContext;
use eco_model::{NewInspector, ResponseValue};
use eco_persistence::{AppState, MemoryStore};

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

const OPTIONS: RunOptions = RunOptions {
    submit_latency: Duration::from_millis(1500),
    location_timeout: Duration::from_secs(10),
};

const SCENARIO: &str = r#"
form = "6B"
notes = "IPAL beroperasi normal."
photos = ["ipal.png", "notes.txt"]

[inspector]
name = "Budi"
nip = "12345"

[business]
name = "PT Hijau Lestari"
kbli = "20111"

[location]
latitude = -6.2
longitude = 106.8

[responses]
"6b_3" = true

[signatures.inspector]
strokes = [[[20, 40], [120, 60], [200, 30]]]

[signatures.responsible]
strokes = [[[30, 30], [90, 90]], [[100, 20], [160, 70]]]
"#;

fn write_fixtures(dir: &Path) {
    fs::write(dir.join("ipal.png"), PNG_MAGIC).unwrap();
    fs::write(dir.join("notes.txt"), "bukan gambar").unwrap();
}

#[tokio::test(start_paused = true)]
async fn scripted_inspection_is_archived() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let catalog = FormCatalog::load_embedded().unwrap();
    let mut app = AppState::load(MemoryStore::new());
    let script = InspectionScript::from_toml_str(SCENARIO).unwrap();

    let outcome = run_script(
        &mut app,
        &catalog,
        &script,
        dir.path(),
        EntryContext::default(),
        OPTIONS,
        &ProgressBar::hidden(),
    )
    .await
    .unwrap();

    let record = &outcome.record;
    assert_eq!(record.form_id, "6B");
    assert_eq!(record.responses.get("6b_3"), &ResponseValue::Boolean(true));
    assert_eq!(record.inspector.nip, "12345");
    assert_eq!(record.photos.len(), 1);
    assert!(record.photos[0].starts_with("data:image/png;base64,"));
    assert!(!record.signatures.inspector.is_empty());
    assert!(!record.signatures.responsible.is_empty());
    assert_eq!(record.business.coordinates().map(|c| c.latitude), Some(-6.2));

    assert_eq!(outcome.created_inspector.as_deref(), Some(record.inspector.id.as_str()));
    assert_eq!(outcome.location_warning, None);
    assert_eq!(outcome.photo_failures.len(), 1);
    assert_eq!(app.archive().first().map(|r| r.id.as_str()), Some(record.id.as_str()));
}

#[tokio::test(start_paused = true)]
async fn missing_location_is_recorded_as_manual_input() {
    let catalog = FormCatalog::load_embedded().unwrap();
    let mut app = AppState::load(MemoryStore::new());
    let rina = app
        .add_inspector(NewInspector::new("Rina", "67890"))
        .unwrap();
    let script = InspectionScript::from_toml_str(&format!(
        r#"
[inspector]
id = "{}"

[business]
name = "CV Tirta"

[signatures.inspector]
strokes = [[[10, 10], [50, 50]]]

[signatures.responsible]
strokes = [[[10, 10], [50, 50]]]
"#,
        rina.id
    ))
    .unwrap();

    let outcome = run_script(
        &mut app,
        &catalog,
        &script,
        Path::new("."),
        EntryContext::with_form("6C"),
        OPTIONS,
        &ProgressBar::hidden(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.record.form_id, "6C");
    assert_eq!(outcome.record.business.coordinates(), None);
    assert_eq!(
        outcome.location_warning.as_deref(),
        Some("Browser/Perangkat tidak mendukung fitur GPS.")
    );
    assert_eq!(outcome.created_inspector, None);
}

#[tokio::test(start_paused = true)]
async fn unsigned_script_archives_nothing() {
    let catalog = FormCatalog::load_embedded().unwrap();
    let mut app = AppState::load(MemoryStore::new());
    let script = InspectionScript::from_toml_str(
        "form = \"6A\"\n[inspector]\nname = \"Budi\"\n[signatures.inspector]\nstrokes = [[[1, 1], [9, 9]]]\n",
    )
    .unwrap();

    let err = run_script(
        &mut app,
        &catalog,
        &script,
        Path::new("."),
        EntryContext::default(),
        OPTIONS,
        &ProgressBar::hidden(),
    )
    .await
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Tanda tangan penanggung jawab usaha belum diisi."
    );
    assert!(app.archive().is_empty());
}

#[tokio::test(start_paused = true)]
async fn script_without_form_is_rejected() {
    let catalog = FormCatalog::load_embedded().unwrap();
    let mut app = AppState::load(MemoryStore::new());
    let script = InspectionScript::from_toml_str("[inspector]\nname = \"Budi\"\n").unwrap();

    let err = run_script(
        &mut app,
        &catalog,
        &script,
        Path::new("."),
        EntryContext::default(),
        OPTIONS,
        &ProgressBar::hidden(),
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("form"));
}

#[tokio::test(start_paused = true)]
async fn history_exports_as_csv() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let catalog = FormCatalog::load_embedded().unwrap();
    let mut app = AppState::load(MemoryStore::new());
    let script = InspectionScript::from_toml_str(SCENARIO).unwrap();
    run_script(
        &mut app,
        &catalog,
        &script,
        dir.path(),
        EntryContext::default(),
        OPTIONS,
        &ProgressBar::hidden(),
    )
    .await
    .unwrap();

    let records = app.archive().filter("budi");
    let mut out = Vec::new();
    write_history_csv(&mut out, &records).unwrap();
    let csv = String::from_utf8(out).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("id,form_id,form_title,date,business,inspector,nip,photos")
    );
    let row = HistoryRow::from(records[0]);
    let line = lines.next().unwrap();
    assert!(line.starts_with(&format!("{},6B,6B PPMA Air Limbah,", row.id)));
    assert!(line.ends_with(",PT Hijau Lestari,Budi,12345,1"));
}
