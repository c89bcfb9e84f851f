use std::collections::HashMap;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::forms::{self, CompareData, FormResult};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{Table, TableColumn, TableRenderer, UiStyle};
use crate::core::services::ComparisonService;
use crate::domain::{Comparison, OptionCosts, ScenarioInputs, Winner};

use super::parse_money;

const USAGE: &str = "compare gross=<amount> fuel=<amount> a.fixed=<amount> a.pct=<percent> \
[a.maint=<amount>] b.fixed=<amount> b.pct=<percent> [b.maint=<amount>] [hours=<hours>] \
[a.label=<text>] [b.label=<text>]";

pub const DEFAULT_LABEL_A: &str = "Rental";
pub const DEFAULT_LABEL_B: &str = "Owned";

const KNOWN_KEYS: &[&str] = &[
    "gross", "fuel", "hours", "a.fixed", "a.pct", "a.maint", "a.label", "b.fixed", "b.pct",
    "b.maint", "b.label",
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "compare",
        "Compare net earnings of two vehicle options",
        USAGE,
        cmd_compare,
    )]
}

fn canonical_key(key: &str) -> &str {
    match key {
        "apuro" => "gross",
        "combustivel" | "combustível" => "fuel",
        "horas" => "hours",
        other => other,
    }
}

fn parse_pairs(args: &[&str]) -> Result<HashMap<String, String>, CommandError> {
    let mut pairs = HashMap::new();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            return Err(CommandError::InvalidArguments(format!(
                "expected key=value, got `{arg}`"
            )));
        };
        let lowered = key.trim().to_lowercase();
        let key = canonical_key(&lowered);
        if !KNOWN_KEYS.contains(&key) {
            return Err(CommandError::InvalidArguments(format!(
                "unknown compare key `{key}`"
            )));
        }
        pairs.insert(key.to_string(), value.trim().to_string());
    }
    Ok(pairs)
}

fn required(pairs: &HashMap<String, String>, key: &str) -> Result<f64, CommandError> {
    match pairs.get(key) {
        Some(value) => parse_money(value),
        None => Err(CommandError::InvalidArguments(format!(
            "missing `{key}=`; usage: {USAGE}"
        ))),
    }
}

fn optional(pairs: &HashMap<String, String>, key: &str) -> Result<Option<f64>, CommandError> {
    pairs.get(key).map(|value| parse_money(value)).transpose()
}

fn option_from(
    pairs: &HashMap<String, String>,
    prefix: &str,
    default_label: &str,
) -> Result<OptionCosts, CommandError> {
    let label = pairs
        .get(&format!("{prefix}.label"))
        .cloned()
        .unwrap_or_else(|| default_label.to_string());
    let pct_raw = pairs
        .get(&format!("{prefix}.pct"))
        .map(|value| value.trim_end_matches('%').to_string())
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("missing `{prefix}.pct=`; usage: {USAGE}"))
        })?;
    let mut option = OptionCosts::new(
        label,
        required(pairs, &format!("{prefix}.fixed"))?,
        parse_money(&pct_raw)?,
    );
    if let Some(maintenance) = optional(pairs, &format!("{prefix}.maint"))? {
        option = option.with_maintenance(maintenance);
    }
    Ok(option)
}

/// Hours are not money: zero and negatives reach the comparison service,
/// which reports them as a division error.
fn parse_hours(raw: &str) -> Result<f64, CommandError> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{}` is not a number", raw.trim())))
}

pub(crate) fn data_from_args(args: &[&str]) -> Result<CompareData, CommandError> {
    let pairs = parse_pairs(args)?;
    Ok(CompareData {
        gross: required(&pairs, "gross")?,
        fuel: required(&pairs, "fuel")?,
        option_a: option_from(&pairs, "a", DEFAULT_LABEL_A)?,
        option_b: option_from(&pairs, "b", DEFAULT_LABEL_B)?,
        hours: pairs.get("hours").map(|raw| parse_hours(raw)).transpose()?,
    })
}

pub(crate) fn comparison_table(
    comparison: &Comparison,
    format_amount: impl Fn(f64) -> String,
) -> Table {
    let per_hour = comparison.option_a.net_per_hour.is_some();
    let mut columns = vec![
        TableColumn::left("Option", 8),
        TableColumn::right("Commission", 10),
        TableColumn::right("Deductions", 10),
        TableColumn::right("Net", 10),
    ];
    if per_hour {
        columns.push(TableColumn::right("Net/hour", 10));
    }
    let mut table = Table::new(None::<String>, columns);
    for outcome in [&comparison.option_a, &comparison.option_b] {
        let mut row = vec![
            outcome.label.clone(),
            format_amount(outcome.commission),
            format_amount(outcome.deductions),
            format_amount(outcome.net),
        ];
        if let Some(rate) = outcome.net_per_hour {
            row.push(format_amount(rate));
        }
        table.add_row(row);
    }
    table
}

pub(crate) fn verdict(comparison: &Comparison, format_amount: impl Fn(f64) -> String) -> String {
    match (comparison.winner, comparison.winning_outcome()) {
        (Winner::Tie, _) | (_, None) => "Both options leave the same amount.".to_string(),
        (winner, Some(outcome)) => format!(
            "Best: {} ({winner}), {} more.",
            outcome.label,
            format_amount(comparison.margin())
        ),
    }
}

fn cmd_compare(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let data = if args.is_empty() && context.can_prompt() {
        match forms::compare(&context.theme, DEFAULT_LABEL_A, DEFAULT_LABEL_B)? {
            FormResult::Completed(data) => data,
            FormResult::Cancelled => {
                io::print_info("Operation cancelled.");
                return Ok(());
            }
        }
    } else if args.is_empty() {
        return Err(CommandError::usage(USAGE));
    } else {
        data_from_args(args)?
    };

    let scenario = ScenarioInputs::new(
        data.gross,
        data.fuel,
        data.option_a,
        data.option_b,
        data.hours,
    )?;
    let comparison = ComparisonService::compare_options(&scenario)?;

    output_section("Comparison");
    println!(
        "Net after fuel: {}",
        context.format_amount(comparison.net_after_fuel)
    );
    let table = comparison_table(&comparison, |amount| context.format_amount(amount));
    TableRenderer::render(&table, &UiStyle::detect());
    io::print_success(verdict(&comparison, |amount| context.format_amount(amount)));
    Ok(())
}
