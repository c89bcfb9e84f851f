use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::{
    errors::LedgerError,
    utils::{ensure_dir, PathResolver},
};
use crate::storage::json_backend::DEFAULT_RETENTION;

const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Keys accepted by [`Config::set_value`].
pub const CONFIG_KEYS: &[&str] = &[
    "currency",
    "currency_precision",
    "ui_color_enabled",
    "backup_retention",
    "ledger_file",
];

/// User preferences persisted next to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub currency: String,
    #[serde(default = "Config::default_precision")]
    pub currency_precision: u8,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,
    /// Overrides the default `despesas.json` location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "EUR".into(),
            currency_precision: Self::default_precision(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            backup_retention: Self::default_backup_retention(),
            ledger_file: None,
        }
    }
}

impl Config {
    fn default_precision() -> u8 {
        2
    }

    fn default_ui_color_enabled() -> bool {
        true
    }

    fn default_backup_retention() -> usize {
        DEFAULT_RETENTION
    }

    /// Updates a single preference from its textual form.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        let value = value.trim();
        match key.to_lowercase().as_str() {
            "currency" => {
                if value.is_empty() {
                    return Err(LedgerError::Config("currency must not be empty".into()));
                }
                self.currency = value.to_uppercase();
            }
            "currency_precision" => {
                let precision: u8 = value.parse().map_err(|_| {
                    LedgerError::Config(format!("`{value}` is not a valid precision"))
                })?;
                if precision > 6 {
                    return Err(LedgerError::Config(
                        "currency_precision must be between 0 and 6".into(),
                    ));
                }
                self.currency_precision = precision;
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = parse_bool(value)?;
            }
            "backup_retention" => {
                let retention: usize = value.parse().map_err(|_| {
                    LedgerError::Config(format!("`{value}` is not a valid retention count"))
                })?;
                if retention == 0 {
                    return Err(LedgerError::Config(
                        "backup_retention must be at least 1".into(),
                    ));
                }
                self.backup_retention = retention;
            }
            "ledger_file" => {
                self.ledger_file = match value {
                    "" | "default" | "none" => None,
                    path => Some(PathBuf::from(path)),
                };
            }
            other => {
                return Err(LedgerError::Config(format!(
                    "unknown key `{other}` (expected one of: {})",
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Key/value pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("currency", self.currency.clone()),
            ("currency_precision", self.currency_precision.to_string()),
            ("ui_color_enabled", self.ui_color_enabled.to_string()),
            ("backup_retention", self.backup_retention.to_string()),
            (
                "ledger_file",
                self.ledger_file
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "(default)".into()),
            ),
        ]
    }
}

fn parse_bool(value: &str) -> Result<bool, LedgerError> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(LedgerError::Config(format!("`{other}` is not a boolean"))),
    }
}

/// Loads and saves [`Config`] under `<base>/config/config.json`.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        let config_root = PathResolver::config_dir_in(&base);
        ensure_dir(&config_root)?;
        Ok(Self {
            path: config_root.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| LedgerError::Config(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
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

fn write_atomic(path: &Path, data: &str) -> Result<(), LedgerError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
