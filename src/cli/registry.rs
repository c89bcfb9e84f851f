use std::collections::HashMap;

use crate::cli::core::CommandResult;
use crate::cli::menus::MenuAction;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// How a line of input mapped onto the registry.
pub enum Resolution<'a> {
    Command(&'a CommandEntry),
    /// A number outside the menu range.
    InvalidChoice(String),
    Unknown,
}

#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        let name = entry.name;
        if self.commands.insert(name, entry).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    pub fn list(&self) -> Vec<&CommandEntry> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    /// Resolves a menu number (`1`–`5`) or a command name, case-insensitively.
    pub fn resolve(&self, input: &str) -> Resolution<'_> {
        let trimmed = input.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit()) {
            return match trimmed.parse().ok().and_then(MenuAction::from_choice) {
                Some(action) => self
                    .get(action.command())
                    .map(Resolution::Command)
                    .unwrap_or(Resolution::Unknown),
                None => Resolution::InvalidChoice(trimmed.to_string()),
            };
        }
        match self.get(trimmed.to_lowercase().as_str()) {
            Some(entry) => Resolution::Command(entry),
            None => Resolution::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        for action in MenuAction::ALL {
            registry.register(CommandEntry::new(action.command(), "", "", noop));
        }
        registry.register(CommandEntry::new("compare", "", "", noop));
        registry
    }

    #[test]
    fn menu_numbers_resolve_to_commands() {
        let registry = registry();
        match registry.resolve("4") {
            Resolution::Command(entry) => assert_eq!(entry.name, "summary"),
            _ => panic!("4 should resolve to summary"),
        }
        match registry.resolve(" 5 ") {
            Resolution::Command(entry) => assert_eq!(entry.name, "exit"),
            _ => panic!("5 should resolve to exit"),
        }
    }

    #[test]
    fn out_of_range_numbers_are_invalid_choices() {
        let registry = registry();
        assert!(matches!(registry.resolve("0"), Resolution::InvalidChoice(_)));
        assert!(matches!(registry.resolve("9"), Resolution::InvalidChoice(_)));
        assert!(matches!(
            registry.resolve("99999999999999999999"),
            Resolution::InvalidChoice(_)
        ));
    }

    #[test]
    fn names_resolve_case_insensitively() {
        let registry = registry();
        assert!(matches!(registry.resolve("COMPARE"), Resolution::Command(_)));
        assert!(matches!(registry.resolve("bogus"), Resolution::Unknown));
        assert_eq!(registry.names().count(), 6);
    }
}
