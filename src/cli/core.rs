//! Dispatch, error reporting and setup for the CLI shell context.

use std::{io, path::PathBuf};

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use tracing::debug;

use crate::{
    config::{Config, ConfigManager},
    core::{
        errors::LedgerError,
        ledger_store::{LedgerStore, LoadSource},
        utils::PathResolver,
    },
    currency::CurrencyFormat,
    storage::JsonStorage,
};

pub use crate::core::errors::CliError;

use super::commands;
use super::io as cli_io;
use super::registry::{CommandRegistry, Resolution};
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl CommandError {
    pub(crate) fn usage(usage: &str) -> Self {
        CommandError::InvalidArguments(format!("usage: {usage}"))
    }
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, PathResolver::base_dir())
    }

    /// Builds a context whose config, ledger and backups all live under `base`.
    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let mut config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                cli_io::print_warning(format!(
                    "Could not read preferences ({err}); using defaults."
                ));
                Config::default()
            }
        };
        cli_io::apply_config(&config);

        let store = match Self::open_store(&config, &base) {
            Ok(store) => store,
            Err(err) if config.ledger_file.is_some() => {
                let configured = config.ledger_file.take().unwrap_or_default();
                cli_io::print_warning(format!(
                    "Could not open {} ({err}); using the default ledger file.",
                    configured.display()
                ));
                Self::open_store(&config, &base)?
            }
            Err(err) => return Err(err.into()),
        };
        let context = ShellContext {
            mode,
            registry,
            store,
            currency: CurrencyFormat::from_config(&config),
            config,
            config_manager,
            base_dir: base,
            theme: ColorfulTheme::default(),
            running: true,
        };
        context.report_load();
        Ok(context)
    }

    pub(crate) fn open_store(
        config: &Config,
        base: &std::path::Path,
    ) -> Result<LedgerStore, LedgerError> {
        let ledger_path = config
            .ledger_file
            .clone()
            .unwrap_or_else(|| PathResolver::ledger_file_in(base));
        let storage = JsonStorage::new(
            ledger_path,
            PathResolver::backup_dir_in(base),
            config.backup_retention,
        )?;
        Ok(LedgerStore::open(Box::new(storage)))
    }

    /// Swaps in a store opened for new storage preferences.
    pub(crate) fn replace_store(&mut self, store: LedgerStore) {
        self.store = store;
        self.report_load();
    }

    fn report_load(&self) {
        if let LoadSource::Defaults { reason } = self.store.source() {
            if self.store.location().exists() {
                cli_io::print_warning(format!(
                    "Could not read {} ({reason}); starting from the default expenses.",
                    self.store.location().display()
                ));
            } else if self.mode == CliMode::Interactive {
                cli_io::print_info("No saved expenses yet; starting from the default list.");
            }
        }
        for warning in self.store.warnings() {
            cli_io::print_warning(warning);
        }
    }

    /// Re-applies preferences that affect output formatting.
    pub(crate) fn apply_config(&mut self) {
        cli_io::apply_config(&self.config);
        self.currency = CurrencyFormat::from_config(&self.config);
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        "sobra> ".to_string()
    }

    pub(crate) fn dispatch(&mut self, raw: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        let handler = match self.registry.resolve(raw) {
            Resolution::Command(entry) => entry.handler,
            Resolution::InvalidChoice(choice) => {
                cli_io::print_warning(format!(
                    "Invalid option `{choice}`. Choose a number from 1 to 5."
                ));
                return Ok(LoopControl::Continue);
            }
            Resolution::Unknown => {
                self.suggest_command(raw);
                return Ok(LoopControl::Continue);
            }
        };
        debug!(command = raw, ?args, "dispatching command");
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    /// Tokenizes and runs one line of input.
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err.to_string());
                return Ok(LoopControl::Continue);
            }
        };
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        match self.dispatch(raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit?", true).unwrap_or(true))
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(LedgerError::Validation(message)) => {
                cli_io::print_error(format!("Invalid input: {message}"));
            }
            other => cli_io::print_error(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn script_context() -> (tempfile::TempDir, ShellContext) {
        let temp = tempfile::tempdir().unwrap();
        let context =
            ShellContext::with_base_dir(CliMode::Script, temp.path().to_path_buf()).unwrap();
        (temp, context)
    }

    #[test]
    fn menu_numbers_dispatch_commands() {
        let (_temp, mut context) = script_context();
        assert_eq!(context.process_line("1").unwrap(), LoopControl::Continue);
        assert_eq!(context.process_line("5").unwrap(), LoopControl::Exit);
        assert!(!context.running);
    }

    #[test]
    fn invalid_menu_choice_keeps_running() {
        let (_temp, mut context) = script_context();
        assert_eq!(context.process_line("9").unwrap(), LoopControl::Continue);
        assert_eq!(context.process_line("frobnicate").unwrap(), LoopControl::Continue);
        assert!(context.running);
    }

    #[test]
    fn add_line_updates_store() {
        let (_temp, mut context) = script_context();
        context
            .process_line("add mensais \"Ginásio Fit\" 29,90 🏋️")
            .unwrap();
        let records = context.store.list_all().records(Category::Monthly);
        let added = records.last().unwrap();
        assert_eq!(added.name(), "Ginásio Fit");
        assert_eq!(added.amount(), 29.9);
    }

    #[test]
    fn command_errors_surface_without_exiting() {
        let (_temp, mut context) = script_context();
        let err = context.process_line("edit mensais 99 10").unwrap_err();
        assert!(matches!(err, CommandError::Core(LedgerError::NotFound(_))));
        let err = context.process_line("add").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        assert!(context.running);
    }

    #[test]
    fn config_ledger_file_reopens_store() {
        let (temp, mut context) = script_context();
        let custom = temp.path().join("elsewhere.json");
        context
            .process_line(&format!("config set ledger_file {}", custom.display()))
            .unwrap();
        assert_eq!(context.store.location(), custom.as_path());
        context.process_line("edit anuais 1 120").unwrap();
        assert!(custom.exists());
    }

    #[test]
    fn unusable_ledger_file_is_not_saved() {
        let (temp, mut context) = script_context();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").unwrap();
        let unusable = blocker.join("despesas.json");

        let err = context
            .process_line(&format!("config set ledger_file {}", unusable.display()))
            .unwrap_err();
        assert!(matches!(err, CommandError::Core(LedgerError::Storage(_))));
        assert_eq!(context.config.ledger_file, None);
        assert_eq!(context.config_manager.load().unwrap().ledger_file, None);
        assert_eq!(
            context.store.location(),
            PathResolver::ledger_file_in(temp.path()).as_path()
        );
    }

    #[test]
    fn startup_falls_back_when_configured_ledger_cannot_open() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.ledger_file = Some(blocker.join("despesas.json"));
        manager.save(&config).unwrap();

        let context =
            ShellContext::with_base_dir(CliMode::Script, temp.path().to_path_buf()).unwrap();
        assert_eq!(context.config.ledger_file, None);
        assert_eq!(
            context.store.location(),
            PathResolver::ledger_file_in(temp.path()).as_path()
        );
    }
}
