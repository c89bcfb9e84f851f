mod common;

use std::fs;
use std::path::Path;

use sobra_core::{
    core::ledger_store::LoadSource,
    domain::{Category, ExpenseRecord, Ledger},
    storage::{load_ledger_from_path, save_ledger_to_path, JsonStorage, LedgerStorage},
};

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::default_schema();
    ledger
        .push(
            Category::Monthly,
            ExpenseRecord::new("Ginásio", 29.9, Some("🏋️".into())).unwrap(),
        )
        .unwrap();
    ledger
        .push(Category::Yearly, ExpenseRecord::new("Seguro vida", 180.0, None).unwrap())
        .unwrap();
    ledger
}

#[test]
fn save_then_load_round_trips() {
    let base = common::temp_base();
    let path = base.join("despesas.json");
    let ledger = sample_ledger();

    save_ledger_to_path(&ledger, &path).expect("save");
    let loaded = load_ledger_from_path(&path).expect("load");
    assert_eq!(loaded, ledger);
    assert!(!tmp_path_for(&path).exists(), "temp file should be renamed away");
}

#[test]
fn fractional_amounts_survive_round_trip() {
    let base = common::temp_base();
    let path = base.join("despesas.json");
    let mut ledger = Ledger::empty();
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    for i in 0..2000 {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let amount = (state >> 11) as f64 / (1u64 << 53) as f64 * 1e10;
        ledger
            .push(
                Category::Monthly,
                ExpenseRecord::new(format!("Item {i}"), amount, None).unwrap(),
            )
            .unwrap();
    }

    save_ledger_to_path(&ledger, &path).expect("save");
    let loaded = load_ledger_from_path(&path).expect("load");
    for (saved, read) in ledger
        .records(Category::Monthly)
        .iter()
        .zip(loaded.records(Category::Monthly))
    {
        assert_eq!(saved.amount().to_bits(), read.amount().to_bits(), "{}", saved.name());
    }
    assert_eq!(loaded, ledger);
}

#[test]
fn persisted_document_uses_portuguese_keys() {
    let (mut store, base) = common::setup_test_env();
    store
        .add_expense(Category::Quarterly, "Revisão", 75.5, None)
        .expect("add");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(base.join("despesas.json")).unwrap()).unwrap();
    let quarterly = json["trimestrais"].as_array().unwrap();
    let added = quarterly.last().unwrap();
    assert_eq!(added["nome"], "Revisão");
    assert_eq!(added["valor"], 75.5);
    assert!(added.get("icon").is_none());
    assert!(json["mensais"][0]["icon"].is_string());
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let base = common::temp_base();
    let storage = JsonStorage::with_base_dir(&base, 3).unwrap();
    let ledger = sample_ledger();
    storage.save_ledger(&ledger).expect("initial save");
    let path = storage.ledger_path().to_path_buf();
    let original = fs::read_to_string(&path).expect("read original file");

    // A directory at the temp path makes File::create fail.
    fs::create_dir_all(tmp_path_for(&path)).unwrap();

    let mut changed = ledger.clone();
    changed
        .record_mut(Category::Monthly, 0)
        .unwrap()
        .set_amount(999.0)
        .unwrap();
    let result = storage.save_ledger(&changed);
    assert!(result.is_err(), "expected save to fail when temp path is a directory");

    let current = fs::read_to_string(&path).expect("read after failure");
    assert_eq!(current, original, "failed save must not touch the ledger file");
}

#[test]
fn missing_category_keys_load_as_empty() {
    let base = common::temp_base();
    let path = base.join("despesas.json");
    fs::write(&path, r#"{"mensais":[{"nome":"Renda","valor":450}]}"#).unwrap();

    let ledger = load_ledger_from_path(&path).expect("load");
    assert_eq!(ledger.records(Category::Monthly).len(), 1);
    assert!(ledger.records(Category::Quarterly).is_empty());
    assert!(ledger.records(Category::Yearly).is_empty());
}

#[test]
fn malformed_document_falls_back_to_defaults() {
    let (_, base) = common::setup_test_env();
    fs::write(base.join("despesas.json"), "{ not json").unwrap();
    let storage = JsonStorage::with_base_dir(&base, 3).unwrap();
    let store = sobra_core::core::ledger_store::LedgerStore::open(Box::new(storage));

    assert_eq!(store.list_all(), &Ledger::default_schema());
    assert!(matches!(store.source(), LoadSource::Defaults { .. }));
}

#[test]
fn saves_keep_bounded_backups() {
    let (mut store, base) = common::setup_test_env();
    for amount in 1..=6 {
        store
            .edit_expense(Category::Monthly, 0, amount as f64)
            .expect("edit");
    }

    let backups = store.backups().expect("list backups");
    assert_eq!(backups.len(), 3);
    assert!(backups.iter().all(|backup| backup.path.starts_with(base.join("backups"))));

    let newest = load_ledger_from_path(&backups[0].path).unwrap();
    assert_eq!(newest.records(Category::Monthly)[0].amount(), 5.0);
}
