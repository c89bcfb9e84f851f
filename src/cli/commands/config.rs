use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::config::CONFIG_KEYS;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return show_config(context);
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    CONFIG_KEYS.join("|")
                )));
            }
            let key = args[1];
            let value = args[2..].join(" ");
            set_config_value(context, key, value.trim())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{other}` (use show or set)"
        ))),
    }
}

fn show_config(context: &mut ShellContext) -> CommandResult {
    output_section("Preferences");
    for (key, value) in context.config.entries() {
        io::print_info(format!("  {key:<20} {value}"));
    }
    io::print_info(format!("  {:<20} {}", "ledger (active)", context.store.location().display()));
    io::print_info(format!("  {:<20} {}", "config file", context.config_manager.path().display()));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set_value(key, value)?;
    let storage_changed = updated.ledger_file != context.config.ledger_file
        || updated.backup_retention != context.config.backup_retention;

    // Nothing is saved unless the new ledger location can be opened.
    let store = if storage_changed {
        Some(ShellContext::open_store(&updated, &context.base_dir)?)
    } else {
        None
    };
    context.config_manager.save(&updated)?;

    context.config = updated;
    context.apply_config();
    if let Some(store) = store {
        context.replace_store(store);
    }
    io::print_success(format!("Set {} = {}.", key.to_lowercase(), value));
    Ok(())
}
