pub mod json_backend;

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::{core::errors::Result, domain::Ledger};

/// Describes a copy of the ledger document taken before it was overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct BackupInfo {
    pub id: String,
    pub created_at: Option<NaiveDateTime>,
    pub size_bytes: u64,
    pub path: PathBuf,
}

/// Abstraction over persistence backends capable of storing the expense ledger.
pub trait LedgerStorage: Send + Sync {
    /// Reads the persisted ledger. Missing or malformed documents are errors here;
    /// callers decide how to recover.
    fn load_ledger(&self) -> Result<Ledger>;
    fn save_ledger(&self, ledger: &Ledger) -> Result<()>;
    fn list_backups(&self) -> Result<Vec<BackupInfo>>;
    fn restore_backup(&self, backup: &BackupInfo) -> Result<Ledger>;
    fn location(&self) -> &Path;
}

pub use json_backend::{load_ledger_from_path, save_ledger_to_path, JsonStorage};
