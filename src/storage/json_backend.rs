use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::{
    core::{
        errors::{LedgerError, Result},
        utils::{ensure_dir, PathResolver},
    },
    domain::Ledger,
};

use super::{BackupInfo, LedgerStorage};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_RETENTION: usize = 5;

/// Filesystem-backed JSON persistence for the expense ledger and its backups.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    ledger_path: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(ledger_path: PathBuf, backups_dir: PathBuf, retention: usize) -> Result<Self> {
        if let Some(parent) = ledger_path.parent() {
            ensure_dir(parent)?;
        }
        ensure_dir(&backups_dir)?;
        Ok(Self {
            ledger_path,
            backups_dir,
            retention: retention.max(1),
        })
    }

    /// Storage laid out under `base`: `despesas.json` plus a `backups/` directory.
    pub fn with_base_dir(base: &Path, retention: usize) -> Result<Self> {
        Self::new(
            PathResolver::ledger_file_in(base),
            PathResolver::backup_dir_in(base),
            retention,
        )
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    fn backup_stem(&self) -> String {
        self.ledger_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("despesas")
            .to_string()
    }

    fn backup_existing_file(&self) -> Result<()> {
        if !self.ledger_path.exists() {
            return Ok(());
        }
        ensure_dir(&self.backups_dir)?;
        let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let prefix = format!("{}_", self.backup_stem());
        let stem = format!("{prefix}{timestamp}");
        let key = timestamp.replace('_', "");
        // Saves within the same second get an increasing counter so ordering survives pruning.
        let last_counter = self
            .list_backups()?
            .iter()
            .map(|info| backup_sort_key(&info.id, &prefix))
            .filter(|(stamp, _)| *stamp == key)
            .map(|(_, counter)| counter)
            .max();
        let file_name = match last_counter {
            Some(counter) => format!("{stem}_{}.{BACKUP_EXTENSION}", counter + 1),
            None => format!("{stem}.{BACKUP_EXTENSION}"),
        };
        let backup_path = self.backups_dir.join(&file_name);
        fs::copy(&self.ledger_path, &backup_path)?;
        debug!(backup = %backup_path.display(), "backed up previous ledger document");
        self.prune_backups()
    }

    fn prune_backups(&self) -> Result<()> {
        let entries = self.list_backups()?;
        for entry in entries.into_iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(&entry.path) {
                warn!(backup = %entry.id, error = %err, "failed to prune old backup");
            }
        }
        Ok(())
    }
}

impl LedgerStorage for JsonStorage {
    fn load_ledger(&self) -> Result<Ledger> {
        if !self.ledger_path.exists() {
            return Err(LedgerError::NotFound(format!(
                "ledger file {}",
                self.ledger_path.display()
            )));
        }
        load_ledger_from_path(&self.ledger_path)
    }

    fn save_ledger(&self, ledger: &Ledger) -> Result<()> {
        if let Some(parent) = self.ledger_path.parent() {
            ensure_dir(parent)?;
        }
        self.backup_existing_file()?;
        save_ledger_to_path(ledger, &self.ledger_path)?;
        info!(path = %self.ledger_path.display(), records = ledger.record_count(), "ledger saved");
        Ok(())
    }

    fn list_backups(&self) -> Result<Vec<BackupInfo>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let prefix = format!("{}_", self.backup_stem());
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if !name.starts_with(&prefix) {
                continue;
            }
            let size_bytes = entry.metadata().map(|meta| meta.len()).unwrap_or(0);
            entries.push(BackupInfo {
                id: name.to_string(),
                created_at: parse_backup_timestamp(name, &prefix),
                size_bytes,
                path: path.clone(),
            });
        }
        entries.sort_by_key(|info| Reverse(backup_sort_key(&info.id, &prefix)));
        Ok(entries)
    }

    fn restore_backup(&self, backup: &BackupInfo) -> Result<Ledger> {
        if !backup.path.exists() {
            return Err(LedgerError::NotFound(format!("backup `{}`", backup.id)));
        }
        load_ledger_from_path(&backup.path)
    }

    fn location(&self) -> &Path {
        &self.ledger_path
    }
}

/// Writes the ledger to `path` by staging to a sibling temp file and renaming over the target.
pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(ledger)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_ledger_from_path(path: &Path) -> Result<Ledger> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

/// Splits `despesas_20250101_120000_2.json` into its timestamp and collision counter.
fn backup_sort_key(name: &str, prefix: &str) -> (String, u32) {
    let Some(body) = name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(&format!(".{BACKUP_EXTENSION}")))
    else {
        return (String::new(), 0);
    };
    let segments: Vec<&str> = body.split('_').collect();
    match segments.as_slice() {
        [date, time] => (format!("{date}{time}"), 0),
        [date, time, counter] => (format!("{date}{time}"), counter.parse().unwrap_or(0)),
        _ => (String::new(), 0),
    }
}

fn parse_backup_timestamp(name: &str, prefix: &str) -> Option<NaiveDateTime> {
    let (raw, _) = backup_sort_key(name, prefix);
    if raw.len() != 14 {
        return None;
    }
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M%S").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, ExpenseRecord};

    fn sample_ledger(amount: f64) -> Ledger {
        let mut ledger = Ledger::empty();
        ledger
            .push(
                Category::Monthly,
                ExpenseRecord::new("Renda", amount, None).unwrap(),
            )
            .unwrap();
        ledger
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let storage = JsonStorage::with_base_dir(temp.path(), 3).unwrap();
        assert!(matches!(
            storage.load_ledger(),
            Err(LedgerError::NotFound(_))
        ));
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = tempfile::tempdir().unwrap();
        let storage = JsonStorage::with_base_dir(temp.path(), 3).unwrap();
        let ledger = sample_ledger(450.0);
        storage.save_ledger(&ledger).unwrap();
        assert_eq!(storage.load_ledger().unwrap(), ledger);
        assert!(!tmp_path(storage.ledger_path()).exists());
    }

    #[test]
    fn malformed_document_is_a_storage_error() {
        let temp = tempfile::tempdir().unwrap();
        let storage = JsonStorage::with_base_dir(temp.path(), 3).unwrap();
        fs::write(storage.ledger_path(), "{ not json").unwrap();
        assert!(matches!(
            storage.load_ledger(),
            Err(LedgerError::Storage(_))
        ));
    }

    #[test]
    fn saves_keep_at_most_retention_backups() {
        let temp = tempfile::tempdir().unwrap();
        let storage = JsonStorage::with_base_dir(temp.path(), 2).unwrap();
        for amount in [1.0, 2.0, 3.0, 4.0, 5.0] {
            storage.save_ledger(&sample_ledger(amount)).unwrap();
        }
        let backups = storage.list_backups().unwrap();
        assert_eq!(backups.len(), 2);
        let newest = storage.restore_backup(&backups[0]).unwrap();
        assert_eq!(newest.records(Category::Monthly)[0].amount(), 4.0);
    }

    #[test]
    fn sort_key_orders_collision_counters_after_base_name() {
        let prefix = "despesas_";
        let base = backup_sort_key("despesas_20250101_120000.json", prefix);
        let second = backup_sort_key("despesas_20250101_120000_2.json", prefix);
        let tenth = backup_sort_key("despesas_20250101_120000_10.json", prefix);
        assert!(base < second && second < tenth);
        assert!(parse_backup_timestamp("despesas_20250101_120000.json", prefix).is_some());
    }
}
