//! Shared runtime state for CLI interactions and command execution.

use std::path::PathBuf;

use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::ledger_store::LedgerStore,
    currency::CurrencyFormat,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: LedgerStore,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub base_dir: PathBuf,
    pub theme: ColorfulTheme,
    pub currency: CurrencyFormat,
    pub running: bool,
}

impl ShellContext {
    pub fn format_amount(&self, amount: f64) -> String {
        self.currency.format(amount)
    }

    /// Interactive prompts are only offered outside script mode.
    pub fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }
}
