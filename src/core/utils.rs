use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::core::errors::LedgerError;

const DEFAULT_DIR_NAME: &str = ".sobra";
const HOME_ENV: &str = "SOBRA_HOME";
const LEDGER_FILE: &str = "despesas.json";
const BACKUP_DIR: &str = "backups";
const CONFIG_DIR: &str = "config";

/// Resolves the on-disk layout used by the CLI.
pub struct PathResolver;

impl PathResolver {
    /// Application data directory: `$SOBRA_HOME` or `~/.sobra`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn ledger_file_in(base: &Path) -> PathBuf {
        base.join(LEDGER_FILE)
    }

    pub fn backup_dir_in(base: &Path) -> PathBuf {
        base.join(BACKUP_DIR)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }
}

pub fn ensure_dir(path: &Path) -> Result<(), LedgerError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_rooted_at_base() {
        let base = PathBuf::from("/tmp/sobra-test");
        assert_eq!(
            PathResolver::ledger_file_in(&base),
            base.join("despesas.json")
        );
        assert_eq!(PathResolver::backup_dir_in(&base), base.join("backups"));
        assert_eq!(PathResolver::config_dir_in(&base), base.join("config"));
    }

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
