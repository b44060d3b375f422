//! Inventory integration tests across backends.

use chrono::{Duration, NaiveDate};
use medstock_core::backend::{InventoryBackend, JsonFileBackend, MemoryBackend};
use medstock_core::db::Database;
use medstock_core::inventory::{Inventory, LoadState};
use medstock_core::models::{MedicineRecord, NewMedicine, StatusCategory, StatusFilter, Summary};
use medstock_core::Settings;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

fn make_record(id: &str, name: &str, batch: &str, offset_days: i64, quantity: u32) -> MedicineRecord {
    MedicineRecord {
        id: id.to_string(),
        name: name.to_string(),
        batch_number: batch.to_string(),
        expiry_date: today() + Duration::days(offset_days),
        quantity,
    }
}

fn make_form(name: &str, batch: &str, offset_days: i64, quantity: &str) -> NewMedicine {
    NewMedicine {
        name: name.to_string(),
        batch_number: batch.to_string(),
        expiry_date: (today() + Duration::days(offset_days))
            .format("%Y-%m-%d")
            .to_string(),
        quantity: quantity.to_string(),
    }
}

fn pinned<B: InventoryBackend>(backend: B) -> Inventory<B> {
    let mut inventory = Inventory::new(backend, Settings::default()).unwrap();
    inventory.set_reference_date(Some(today()));
    inventory.load().unwrap();
    inventory
}

#[test]
fn test_sample_set_summary() {
    let backend = MemoryBackend::with_records(vec![
        make_record("a", "Paracetamol", "BATCH123", 365, 20),
        make_record("b", "Amoxicillin", "AMX456", -10, 5),
        make_record("c", "Cetirizine", "CTZ789", -400, 0),
    ]);
    let inventory = pinned(backend);

    assert_eq!(
        inventory.summary(),
        Summary {
            total: 3,
            expired: 2,
            expiring_soon: 0,
            low_stock: 2,
        }
    );
}

#[test]
fn test_query_preserves_store_order() {
    let records = vec![
        make_record("1", "Zinc", "ZN-9", 200, 40),
        make_record("2", "Amoxicillin", "AMX456", 10, 5),
        make_record("3", "Aspirin", "ASP-1", 50, 60),
        make_record("4", "Co-amoxiclav", "CAM-2", -3, 12),
    ];
    let inventory = pinned(MemoryBackend::with_records(records.clone()));

    let all: Vec<MedicineRecord> = inventory
        .query("", StatusFilter::All)
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(all, records);

    let amox: Vec<&str> = inventory
        .query("AMOX", StatusFilter::All)
        .into_iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(amox, vec!["2", "4"]);

    let expired = inventory.query("amox", StatusCategory::Expired.into());
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].id, "4");
}

#[test]
fn test_sqlite_backed_inventory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.db");

    let added_id = {
        let mut inventory = pinned(Database::open(&path).unwrap());
        inventory.add(make_form("Paracetamol", "BATCH123", 365, "20")).unwrap();
        let amox = inventory.add(make_form("Amoxicillin", "AMX456", 12, "5")).unwrap();
        inventory.add(make_form("Cetirizine", "CTZ789", -30, "0")).unwrap();
        amox.id
    };

    let mut inventory = pinned(Database::open(&path).unwrap());
    assert_eq!(inventory.load_state(), &LoadState::Loaded { count: 3 });

    let names: Vec<&str> = inventory.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Paracetamol", "Amoxicillin", "Cetirizine"]);

    let summary = inventory.summary();
    assert_eq!(summary.expired, 1);
    assert_eq!(summary.expiring_soon, 1);
    assert_eq!(summary.low_stock, 2);

    assert!(inventory.remove(&added_id).unwrap());
    let reopened = pinned(Database::open(&path).unwrap());
    assert_eq!(reopened.records().len(), 2);
    assert!(reopened.get(&added_id).is_none());
}

#[test]
fn test_json_file_backed_inventory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("medicines.json");

    {
        let mut inventory = pinned(JsonFileBackend::new(&path));
        assert!(inventory.records().is_empty());
        inventory.add(make_form("Ibuprofen", "IBU-1", 100, "30")).unwrap();
        inventory.add(make_form("Loratadine", "LOR-7", 100, "8")).unwrap();
    }

    let inventory = pinned(JsonFileBackend::new(&path));
    assert_eq!(inventory.records().len(), 2);
    assert_eq!(
        inventory.query("", StatusCategory::LowStock.into())[0].name,
        "Loratadine"
    );
}

#[test]
fn test_remove_unknown_id_changes_nothing() {
    let mut inventory = pinned(MemoryBackend::demo());
    let before = inventory.records().to_vec();
    let summary_before = inventory.summary();

    assert!(!inventory.remove("no-such-id").unwrap());
    assert_eq!(inventory.records(), before.as_slice());
    assert_eq!(inventory.summary(), summary_before);
}

#[test]
fn test_snapshot_replaces_contents() {
    let mut inventory = pinned(MemoryBackend::demo());
    let snapshot = vec![
        make_record("x", "Metformin", "MET-1", 20, 100),
        make_record("y", "Insulin", "INS-4", 400, 3),
    ];

    inventory.apply_snapshot(snapshot.clone()).unwrap();
    assert_eq!(inventory.records(), snapshot.as_slice());
    assert!(inventory.lookup_batch("AMX456").is_none());
    assert_eq!(inventory.lookup_batch("ins-4").unwrap().id, "y");
}

#[test]
fn test_corrupt_json_surfaces_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("medicines.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut inventory = Inventory::new(JsonFileBackend::new(&path), Settings::default()).unwrap();
    assert!(inventory.load().is_err());
    assert!(matches!(inventory.load_state(), LoadState::Failed { .. }));
}
