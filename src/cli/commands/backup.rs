use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{Table, TableColumn, TableRenderer, UiStyle};
use crate::storage::BackupInfo;

use super::parse_position;

const USAGE: &str = "backup [list|restore <n>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "backup",
        "List or restore automatic ledger backups",
        USAGE,
        cmd_backup,
    )]
}

pub(crate) fn backups_table(backups: &[BackupInfo]) -> Table {
    let mut table = Table::new(
        None::<String>,
        vec![
            TableColumn::right("#", 2),
            TableColumn::left("Backup", 20),
            TableColumn::left("Created", 19),
            TableColumn::right("Size", 6),
        ],
    );
    for (idx, backup) in backups.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            backup.id.clone(),
            backup
                .created_at
                .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "unknown".into()),
            format!("{} B", backup.size_bytes),
        ]);
    }
    table
}

fn cmd_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|sub| sub.to_lowercase()).as_deref() {
        None | Some("list") => list_backups(context),
        Some("restore") => {
            let index = match args.get(1) {
                Some(raw) => parse_position(raw)?,
                None if context.can_prompt() => match select_backup(context)? {
                    Some(index) => index,
                    None => {
                        io::print_info("Operation cancelled.");
                        return Ok(());
                    }
                },
                None => return Err(CommandError::usage("backup restore <n>")),
            };
            restore_backup(context, index)
        }
        Some(_) => Err(CommandError::usage(USAGE)),
    }
}

fn list_backups(context: &mut ShellContext) -> CommandResult {
    let backups = context.store.backups()?;
    if backups.is_empty() {
        io::print_info("No backups yet. One is taken before every save.");
        return Ok(());
    }
    output_section("Backups (newest first)");
    TableRenderer::render(&backups_table(&backups), &UiStyle::detect());
    Ok(())
}

fn select_backup(context: &ShellContext) -> Result<Option<usize>, CommandError> {
    let backups = context.store.backups()?;
    if backups.is_empty() {
        io::print_info("No backups yet.");
        return Ok(None);
    }
    let names: Vec<&str> = backups.iter().map(|backup| backup.id.as_str()).collect();
    io::select(&context.theme, "Restore which backup?", &names)
}

fn restore_backup(context: &mut ShellContext, index: usize) -> CommandResult {
    if context.can_prompt()
        && !io::confirm_action(
            &context.theme,
            "Replace the current expenses with this backup?",
            false,
        )?
    {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    let restored = context.store.restore_backup(index)?;
    io::print_success(format!("Restored expenses from `{}`.", restored.id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    #[test]
    fn table_lists_backups_with_positions() {
        let created = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(10, 30, 0));
        let backups = vec![BackupInfo {
            id: "despesas_20240501_103000".into(),
            created_at: created,
            size_bytes: 512,
            path: PathBuf::from("backups/despesas_20240501_103000.json"),
        }];
        let table = backups_table(&backups);
        assert_eq!(
            table.rows[0],
            vec!["1", "despesas_20240501_103000", "2024-05-01 10:30:00", "512 B"]
        );
    }
}
