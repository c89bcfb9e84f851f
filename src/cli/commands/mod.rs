pub mod backup;
pub mod compare;
pub mod config;
pub mod expense;
pub mod summary;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::domain::{parse_amount, Category};

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(expense::definitions());
    commands.extend(summary::definitions());
    commands.extend(system::definitions());
    commands.extend(compare::definitions());
    commands.extend(backup::definitions());
    commands.extend(config::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in all_definitions() {
        registry.register(entry);
    }
}

pub(crate) fn parse_category(raw: &str) -> Result<Category, CommandError> {
    Ok(raw.parse::<Category>()?)
}

pub(crate) fn parse_money(raw: &str) -> Result<f64, CommandError> {
    Ok(parse_amount(raw)?)
}

/// Parses a one-based position as typed by the user into a zero-based index.
pub(crate) fn parse_position(raw: &str) -> Result<usize, CommandError> {
    match raw.trim().parse::<usize>() {
        Ok(position) if position >= 1 => Ok(position - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{}` is not a valid position (use 1, 2, 3, ...)",
            raw.trim()
        ))),
    }
}
