use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::menus::main_menu;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("exit", "Exit the program", "exit", cmd_exit),
        CommandEntry::new("menu", "Show the numbered menu", "menu", cmd_menu),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("version", "Show version information", "version", cmd_version),
    ]
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section(format!("Sobra {}", env!("CARGO_PKG_VERSION")));
    io::print_info(format!("  Data dir : {}", context.base_dir.display()));
    io::print_info(format!("  Ledger   : {}", context.store.location().display()));
    Ok(())
}

fn cmd_menu(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    main_menu::show();
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(entry) = context.registry.get(&command) {
            help::print_command(entry);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    io::print_info("Goodbye.");
    Err(CommandError::ExitRequested)
}
