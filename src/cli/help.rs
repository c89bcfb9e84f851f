use crate::cli::io;
use crate::cli::menus::MenuAction;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};

fn menu_number(name: &str) -> Option<u8> {
    MenuAction::ALL
        .iter()
        .find(|action| action.command() == name)
        .map(|action| action.choice())
}

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for entry in registry.list() {
        let shortcut = menu_number(entry.name)
            .map(|choice| format!("[{choice}]"))
            .unwrap_or_default();
        io::print_info(format!(
            "  {:<4}{:<10} {}",
            shortcut, entry.name, entry.description
        ));
    }
    io::print_info("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    io::print_info(format!("  Description: {}", entry.description));
    io::print_info(format!("  Usage: {}", entry.usage));
    if let Some(choice) = menu_number(entry.name) {
        io::print_info(format!("  Menu option: {choice}"));
    }
}
