use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::forms::{self, FormResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{Table, TableColumn, TableRenderer, UiStyle};
use crate::domain::{Category, ExpenseRecord};

use super::{parse_category, parse_money, parse_position};

const ADD_USAGE: &str = "add <category> <name> <amount> [icon]";
const EDIT_USAGE: &str = "edit <category> <position> <amount>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "view",
            "List expenses by category",
            "view [category]",
            cmd_view,
        ),
        CommandEntry::new("edit", "Change the amount of an expense", EDIT_USAGE, cmd_edit),
        CommandEntry::new("add", "Add a new expense", ADD_USAGE, cmd_add),
    ]
}

pub(crate) fn category_table(
    category: Category,
    records: &[ExpenseRecord],
    format_amount: impl Fn(f64) -> String,
) -> Table {
    let mut table = Table::new(
        Some(format!("{} ({})", category.label(), category.key())),
        vec![
            TableColumn::right("#", 2),
            TableColumn::left("Expense", 12),
            TableColumn::right("Amount", 10),
        ],
    );
    let mut total = 0.0;
    for (idx, record) in records.iter().enumerate() {
        total += record.amount();
        table.add_row(vec![
            (idx + 1).to_string(),
            record.display_label(),
            format_amount(record.amount()),
        ]);
    }
    table.set_footer(vec![String::new(), "Total".into(), format_amount(total)]);
    table
}

fn cmd_view(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let selected: Vec<Category> = match args.first() {
        Some(raw) => vec![parse_category(raw)?],
        None => Category::ALL.to_vec(),
    };

    let style = UiStyle::detect();
    let ledger = context.store.list_all();
    for category in selected {
        let records = ledger.records(category);
        if records.is_empty() {
            io::print_info(format!("{}: no expenses yet.", category.label()));
            continue;
        }
        let table = category_table(category, records, |amount| context.format_amount(amount));
        TableRenderer::render(&table, &style);
        println!();
    }
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let data = if args.is_empty() && context.can_prompt() {
        match forms::add_expense(&context.theme, context.store.list_all())? {
            FormResult::Completed(data) => data,
            FormResult::Cancelled => {
                io::print_info("Operation cancelled.");
                return Ok(());
            }
        }
    } else {
        if !(3..=4).contains(&args.len()) {
            return Err(CommandError::usage(ADD_USAGE));
        }
        forms::AddExpenseData {
            category: parse_category(args[0])?,
            name: args[1].to_string(),
            amount: parse_money(args[2])?,
            icon: args.get(3).map(|icon| icon.to_string()),
        }
    };

    context
        .store
        .add_expense(data.category, &data.name, data.amount, data.icon)?;
    io::print_success(format!(
        "Added `{}` to {} ({}).",
        data.name.trim(),
        data.category.key(),
        context.format_amount(data.amount)
    ));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let data = if args.is_empty() && context.can_prompt() {
        let ledger = context.store.list_all();
        let currency = context.currency.clone();
        match forms::edit_expense(&context.theme, ledger, |amount| currency.format(amount))? {
            FormResult::Completed(data) => data,
            FormResult::Cancelled => {
                io::print_info("Operation cancelled.");
                return Ok(());
            }
        }
    } else {
        if args.len() != 3 {
            return Err(CommandError::usage(EDIT_USAGE));
        }
        forms::EditExpenseData {
            category: parse_category(args[0])?,
            index: parse_position(args[1])?,
            amount: parse_money(args[2])?,
        }
    };

    let previous = context
        .store
        .edit_expense(data.category, data.index, data.amount)?;
    let name = context.store.list_all().records(data.category)[data.index]
        .name()
        .to_string();
    io::print_success(format!(
        "Updated `{name}`: {} -> {}.",
        context.format_amount(previous),
        context.format_amount(data.amount)
    ));
    Ok(())
}
