use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{Table, TableColumn, TableRenderer, UiStyle};
use crate::core::services::{ProjectionReport, ProjectionService};
use crate::domain::Category;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "summary",
        "Show category totals and the yearly projection",
        "summary",
        cmd_summary,
    )]
}

pub(crate) fn summary_table(report: &ProjectionReport, format_amount: impl Fn(f64) -> String) -> Table {
    let mut table = Table::new(
        None::<String>,
        vec![
            TableColumn::left("Category", 12),
            TableColumn::right("Total", 10),
            TableColumn::right("Per year", 12),
        ],
    );
    for category in Category::ALL {
        let total = report.totals.get(category);
        table.add_row(vec![
            category.label().to_string(),
            format_amount(total),
            format_amount(total * category.periods_per_year()),
        ]);
    }
    table.set_footer(vec![
        "Annual".to_string(),
        String::new(),
        format_amount(report.annual),
    ]);
    table
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let report = ProjectionService::report(context.store.list_all());
    output_section("Summary");
    let table = summary_table(&report, |amount| context.format_amount(amount));
    TableRenderer::render(&table, &UiStyle::detect());
    println!(
        "Annual projection: {}",
        context.format_amount(report.annual)
    );
    println!(
        "Monthly average:   {}",
        context.format_amount(report.monthly_average)
    );
    Ok(())
}
