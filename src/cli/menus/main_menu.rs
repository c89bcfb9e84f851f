//! The numbered console menu and the closed set of actions it offers.

use crate::cli::output;

/// Operations reachable from the numbered main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    View,
    Edit,
    Add,
    Summary,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        MenuAction::View,
        MenuAction::Edit,
        MenuAction::Add,
        MenuAction::Summary,
        MenuAction::Exit,
    ];

    pub fn from_choice(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(MenuAction::View),
            2 => Some(MenuAction::Edit),
            3 => Some(MenuAction::Add),
            4 => Some(MenuAction::Summary),
            5 => Some(MenuAction::Exit),
            _ => None,
        }
    }

    pub fn choice(self) -> u8 {
        match self {
            MenuAction::View => 1,
            MenuAction::Edit => 2,
            MenuAction::Add => 3,
            MenuAction::Summary => 4,
            MenuAction::Exit => 5,
        }
    }

    /// Registry name of the command backing this action.
    pub fn command(self) -> &'static str {
        match self {
            MenuAction::View => "view",
            MenuAction::Edit => "edit",
            MenuAction::Add => "add",
            MenuAction::Summary => "summary",
            MenuAction::Exit => "exit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::View => "View expenses",
            MenuAction::Edit => "Edit an expense",
            MenuAction::Add => "Add an expense",
            MenuAction::Summary => "Summary and projections",
            MenuAction::Exit => "Exit",
        }
    }
}

pub fn menu_lines() -> Vec<String> {
    MenuAction::ALL
        .iter()
        .map(|action| format!("  {}. {}", action.choice(), action.label()))
        .collect()
}

pub fn show() {
    output::section("Expense manager");
    for line in menu_lines() {
        println!("{line}");
    }
    output::hint("Choose 1-5, or type a command such as `compare` or `help`.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_round_trip_through_actions() {
        for action in MenuAction::ALL {
            assert_eq!(MenuAction::from_choice(action.choice()), Some(action));
        }
        assert_eq!(MenuAction::from_choice(0), None);
        assert_eq!(MenuAction::from_choice(6), None);
    }

    #[test]
    fn menu_lists_five_numbered_options() {
        let lines = menu_lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "  1. View expenses");
        assert_eq!(lines[4], "  5. Exit");
    }
}
