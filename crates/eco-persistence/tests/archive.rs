//! Integration tests for application state persistence and archive search.

use chrono::{TimeZone, Utc};
use tempfile::tempdir;

use eco_model::{
    BusinessEntity, InspectionRecord, Inspector, NewInspector, ResponseSet, Signatures,
};
use eco_persistence::{AppState, FileStore, KeyValueStore, MemoryStore, Slot};

fn record(id: &str, business: &str, inspector: &Inspector) -> InspectionRecord {
    let mut entity = BusinessEntity::default();
    entity.name = business.to_string();
    InspectionRecord {
        id: id.to_string(),
        inspector: inspector.clone(),
        business: entity,
        form_id: "6A".to_string(),
        form_title: "6A Persetujuan Lingkungan".to_string(),
        responses: ResponseSet::new(),
        notes: String::new(),
        photos: Vec::new(),
        signatures: Signatures {
            inspector: "data:image/png;base64,AA".to_string(),
            responsible: "data:image/png;base64,AA".to_string(),
        },
        created_at: Utc.with_ymd_and_hms(2024, 5, 17, 2, 41, 0).unwrap(),
    }
}

#[test]
fn filter_matches_business_or_inspector_name_ignoring_case() {
    let mut state = AppState::load(MemoryStore::new());
    let budi = state.add_inspector(NewInspector::new("Budi", "12345")).unwrap();
    let siti = state
        .add_inspector(NewInspector::new("Siti Acmenia", "67890"))
        .unwrap();

    state.add_record(record("AAAAAAAA1", "Acme Corp", &budi)).unwrap();
    state.add_record(record("AAAAAAAA2", "PT Hijau Lestari", &siti)).unwrap();
    state.add_record(record("AAAAAAAA3", "CV Sumber Air", &budi)).unwrap();

    let hits: Vec<&str> = state
        .archive()
        .filter("acme")
        .into_iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(hits, ["AAAAAAAA2", "AAAAAAAA1"]);

    assert_eq!(state.archive().filter("").len(), 3);
    assert_eq!(state.archive().filter("HIJAU").len(), 1);
    assert!(state.archive().filter("zzz").is_empty());
}

#[test]
fn archive_is_most_recent_first() {
    let mut state = AppState::load(MemoryStore::new());
    let budi = state.add_inspector(NewInspector::new("Budi", "12345")).unwrap();
    for id in ["R00000001", "R00000002", "R00000003"] {
        state.add_record(record(id, "PT Hijau Lestari", &budi)).unwrap();
    }
    let ids: Vec<&str> = state.archive().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["R00000003", "R00000002", "R00000001"]);
    assert_eq!(state.archive().first().unwrap().id, "R00000003");
}

#[test]
fn state_survives_reload_from_disk() {
    let dir = tempdir().unwrap();

    let mut state = AppState::load(FileStore::new(dir.path()));
    state.login("Rina").unwrap();
    let budi = state.add_inspector(NewInspector::new("Budi", "12345")).unwrap();
    let id = state.next_record_id().unwrap();
    assert_eq!(id, id.to_ascii_uppercase());
    state.add_record(record(&id, "PT Hijau Lestari", &budi)).unwrap();
    drop(state);

    let reloaded = AppState::load(FileStore::new(dir.path()));
    assert_eq!(reloaded.user().unwrap().name, "Rina");
    assert_eq!(reloaded.inspectors().find(&budi.id), Some(&budi));
    assert_eq!(reloaded.archive().find(&id).unwrap().business.name, "PT Hijau Lestari");

    let status = reloaded.status();
    assert_eq!(status.user.as_deref(), Some("Rina"));
    assert_eq!((status.inspectors, status.records), (1, 1));
}

#[test]
fn corrupt_history_file_is_tolerated() {
    let dir = tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    store.set(Slot::History, "[{\"id\": 42}]").unwrap();
    store.set(Slot::User, r#"{"name":"Rina"}"#).unwrap();

    let state = AppState::load(store);
    assert!(state.archive().is_empty());
    assert!(state.is_authenticated());
}

#[test]
fn removing_an_inspector_keeps_history_intact() {
    let mut state = AppState::load(MemoryStore::new());
    let budi = state.add_inspector(NewInspector::new("Budi", "12345")).unwrap();
    state.add_record(record("R00000001", "PT Hijau Lestari", &budi)).unwrap();
    state.add_record(record("R00000002", "Acme Corp", &budi)).unwrap();

    let referenced = state.remove_inspector(&budi.id).unwrap();
    assert_eq!(referenced, 2);
    assert!(state.inspectors().is_empty());
    assert_eq!(state.archive().find("R00000001").unwrap().inspector.name, "Budi");
}
