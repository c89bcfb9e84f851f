//! Owner of the in-memory ledger and sole writer of its backing document.

use std::path::Path;

use tracing::{info, warn};

use crate::{
    core::errors::{LedgerError, Result},
    domain::{Category, ExpenseRecord, Ledger},
    storage::{BackupInfo, LedgerStorage},
};

/// Where the ledger currently held in memory came from.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadSource {
    File,
    /// Nothing usable was on disk; `reason` explains why.
    Defaults { reason: String },
}

pub struct LedgerStore {
    storage: Box<dyn LedgerStorage>,
    ledger: Ledger,
    source: LoadSource,
    warnings: Vec<String>,
}

impl LedgerStore {
    /// Builds a store and immediately loads whatever the backend holds.
    pub fn open(storage: Box<dyn LedgerStorage>) -> Self {
        let mut store = Self {
            storage,
            ledger: Ledger::default_schema(),
            source: LoadSource::Defaults {
                reason: "not loaded".into(),
            },
            warnings: Vec::new(),
        };
        store.load();
        store
    }

    /// Reloads from the backend. Never fails: a missing or malformed document
    /// yields the default schema.
    pub fn load(&mut self) -> &Ledger {
        self.warnings.clear();
        match self.storage.load_ledger() {
            Ok(ledger) => {
                for (category, name) in ledger.duplicate_names() {
                    self.warnings.push(format!(
                        "expense `{name}` appears more than once in {}",
                        category.key()
                    ));
                }
                for warning in &self.warnings {
                    warn!("{warning}");
                }
                info!(records = ledger.record_count(), "ledger loaded");
                self.ledger = ledger;
                self.source = LoadSource::File;
            }
            Err(LedgerError::NotFound(what)) => {
                info!("no ledger found ({what}); starting from defaults");
                self.ledger = Ledger::default_schema();
                self.source = LoadSource::Defaults {
                    reason: format!("{what} does not exist yet"),
                };
            }
            Err(err) => {
                warn!(error = %err, "ledger document unreadable; falling back to defaults");
                self.ledger = Ledger::default_schema();
                self.source = LoadSource::Defaults {
                    reason: err.to_string(),
                };
            }
        }
        &self.ledger
    }

    /// Persists `ledger` over the backing document and adopts it as current.
    pub fn save(&mut self, ledger: Ledger) -> Result<()> {
        self.storage.save_ledger(&ledger)?;
        self.ledger = ledger;
        self.source = LoadSource::File;
        Ok(())
    }

    /// Appends a new expense and persists the ledger.
    pub fn add_expense(
        &mut self,
        category: Category,
        name: &str,
        amount: f64,
        icon: Option<String>,
    ) -> Result<()> {
        let record = ExpenseRecord::new(name, amount, icon)?;
        let mut working = self.ledger.clone();
        working.push(category, record)?;
        self.save(working)
    }

    /// Replaces the amount of the record at `index` (zero-based) and persists.
    /// Returns the previous amount.
    pub fn edit_expense(&mut self, category: Category, index: usize, new_amount: f64) -> Result<f64> {
        let mut working = self.ledger.clone();
        let record = working.record_mut(category, index)?;
        let previous = record.amount();
        record.set_amount(new_amount)?;
        self.save(working)?;
        Ok(previous)
    }

    pub fn list_all(&self) -> &Ledger {
        &self.ledger
    }

    pub fn source(&self) -> &LoadSource {
        &self.source
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn location(&self) -> &Path {
        self.storage.location()
    }

    pub fn backups(&self) -> Result<Vec<BackupInfo>> {
        self.storage.list_backups()
    }

    /// Restores the backup at `index` in [`LedgerStore::backups`] order (newest first).
    pub fn restore_backup(&mut self, index: usize) -> Result<BackupInfo> {
        let backups = self.backups()?;
        let backup = backups.get(index).cloned().ok_or_else(|| {
            LedgerError::NotFound(format!(
                "no backup at position {} ({} available)",
                index + 1,
                backups.len()
            ))
        })?;
        let ledger = self.storage.restore_backup(&backup)?;
        self.save(ledger)?;
        info!(backup = %backup.id, "ledger restored from backup");
        Ok(backup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonStorage;
    use std::fs;

    fn store_in(dir: &Path) -> LedgerStore {
        let storage = JsonStorage::with_base_dir(dir, 3).unwrap();
        LedgerStore::open(Box::new(storage))
    }

    #[test]
    fn open_without_file_uses_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        assert_eq!(store.list_all(), &Ledger::default_schema());
        assert!(matches!(store.source(), LoadSource::Defaults { .. }));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("despesas.json"), "[1, 2, 3]").unwrap();
        let store = store_in(temp.path());
        assert_eq!(store.list_all(), &Ledger::default_schema());
        match store.source() {
            LoadSource::Defaults { reason } => assert!(!reason.is_empty()),
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[test]
    fn add_expense_persists_immediately() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_in(temp.path());
        store
            .add_expense(Category::Monthly, "Ginásio", 30.0, Some("🏋️".into()))
            .unwrap();

        let reopened = store_in(temp.path());
        let records = reopened.list_all().records(Category::Monthly);
        let added = records.last().unwrap();
        assert_eq!(added.name(), "Ginásio");
        assert_eq!(added.icon(), Some("🏋️"));
        assert_eq!(reopened.source(), &LoadSource::File);
    }

    #[test]
    fn rejected_add_leaves_ledger_untouched() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_in(temp.path());
        let before = store.list_all().clone();
        assert!(matches!(
            store.add_expense(Category::Monthly, "", 10.0, None),
            Err(LedgerError::Validation(_))
        ));
        assert!(matches!(
            store.add_expense(Category::Monthly, "Renda", 10.0, None),
            Err(LedgerError::Validation(_))
        ));
        assert_eq!(store.list_all(), &before);
        assert!(!store.location().exists());
    }

    #[test]
    fn edit_expense_updates_in_place() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_in(temp.path());
        let previous = store.edit_expense(Category::Yearly, 0, 120.0).unwrap();
        assert_eq!(previous, 0.0);
        assert_eq!(store.list_all().records(Category::Yearly)[0].amount(), 120.0);

        let err = store.edit_expense(Category::Yearly, 99, 1.0).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
        let err = store.edit_expense(Category::Yearly, 0, -1.0).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(store.list_all().records(Category::Yearly)[0].amount(), 120.0);
    }

    #[test]
    fn restore_backup_brings_back_previous_document() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_in(temp.path());
        store.edit_expense(Category::Monthly, 0, 400.0).unwrap();
        store.edit_expense(Category::Monthly, 0, 500.0).unwrap();

        let restored = store.restore_backup(0).unwrap();
        assert!(restored.id.starts_with("despesas_"));
        assert_eq!(store.list_all().records(Category::Monthly)[0].amount(), 400.0);
        assert!(matches!(
            store.restore_backup(42),
            Err(LedgerError::NotFound(_))
        ));
    }
}
