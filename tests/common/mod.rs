#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use once_cell::sync::Lazy;
use sobra_core::{core::ledger_store::LedgerStore, storage::JsonStorage};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh base directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Creates an isolated store backed by a unique directory for each test.
pub fn setup_test_env() -> (LedgerStore, PathBuf) {
    let base = temp_base();
    let storage = JsonStorage::with_base_dir(&base, 3).expect("create json storage backend");
    (LedgerStore::open(Box::new(storage)), base)
}
