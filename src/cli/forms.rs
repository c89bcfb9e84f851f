//! Interactive data entry for commands invoked without arguments.
//!
//! Every form validates as the user types, so a completed form always holds
//! values the store and comparison service will accept. ESC on a selection
//! cancels the whole form.

use dialoguer::theme::ColorfulTheme;

use crate::cli::core::CommandError;
use crate::cli::io;
use crate::domain::{parse_amount, Category, Ledger, OptionCosts};

/// Outcome of running a form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddExpenseData {
    pub category: Category,
    pub name: String,
    pub amount: f64,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditExpenseData {
    pub category: Category,
    pub index: usize,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompareData {
    pub gross: f64,
    pub fuel: f64,
    pub option_a: OptionCosts,
    pub option_b: OptionCosts,
    pub hours: Option<f64>,
}

pub fn select_category(theme: &ColorfulTheme) -> Result<Option<Category>, CommandError> {
    let labels: Vec<String> = Category::ALL
        .iter()
        .map(|category| format!("{} ({})", category.label(), category.key()))
        .collect();
    Ok(io::select(theme, "Category", &labels)?.map(|idx| Category::ALL[idx]))
}

fn prompt_amount(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: Option<&str>,
) -> Result<f64, CommandError> {
    let raw = io::prompt_validated(theme, prompt, initial, |value| {
        parse_amount(value).map(|_| ()).map_err(|err| err.to_string())
    })?;
    Ok(parse_amount(&raw)?)
}

fn prompt_optional_amount(theme: &ColorfulTheme, prompt: &str) -> Result<Option<f64>, CommandError> {
    let raw = io::prompt_validated(theme, prompt, Some(""), |value| {
        if value.trim().is_empty() {
            return Ok(());
        }
        parse_amount(value).map(|_| ()).map_err(|err| err.to_string())
    })?;
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(parse_amount(&raw)?))
    }
}

fn prompt_percentage(theme: &ColorfulTheme, prompt: &str) -> Result<f64, CommandError> {
    let validate = |value: &str| -> Result<f64, String> {
        let pct = parse_amount(value.trim_end_matches('%')).map_err(|err| err.to_string())?;
        if pct > 100.0 {
            return Err("commission must be between 0 and 100".into());
        }
        Ok(pct)
    };
    let raw = io::prompt_validated(theme, prompt, None, |value| validate(value).map(|_| ()))?;
    validate(&raw).map_err(CommandError::InvalidArguments)
}

pub fn add_expense(
    theme: &ColorfulTheme,
    ledger: &Ledger,
) -> Result<FormResult<AddExpenseData>, CommandError> {
    let Some(category) = select_category(theme)? else {
        return Ok(FormResult::Cancelled);
    };
    let name = io::prompt_validated(theme, "Name", None, |value| {
        if value.trim().is_empty() {
            Err("name must not be empty".into())
        } else if ledger.contains(category, value) {
            Err(format!("`{}` already exists in {}", value.trim(), category.key()))
        } else {
            Ok(())
        }
    })?;
    let amount = prompt_amount(theme, "Amount", None)?;
    let icon = io::prompt_validated(theme, "Icon (optional)", Some(""), |_| Ok(()))?;
    let icon = Some(icon.trim().to_string()).filter(|icon| !icon.is_empty());

    Ok(FormResult::Completed(AddExpenseData {
        category,
        name: name.trim().to_string(),
        amount,
        icon,
    }))
}

pub fn edit_expense(
    theme: &ColorfulTheme,
    ledger: &Ledger,
    format_amount: impl Fn(f64) -> String,
) -> Result<FormResult<EditExpenseData>, CommandError> {
    let Some(category) = select_category(theme)? else {
        return Ok(FormResult::Cancelled);
    };
    let records = ledger.records(category);
    if records.is_empty() {
        io::print_warning(format!("No expenses in {} yet.", category.key()));
        return Ok(FormResult::Cancelled);
    }
    let items: Vec<String> = records
        .iter()
        .map(|record| format!("{}  {}", record.display_label(), format_amount(record.amount())))
        .collect();
    let Some(index) = io::select(theme, "Expense", &items)? else {
        return Ok(FormResult::Cancelled);
    };
    let current = records[index].amount().to_string();
    let amount = prompt_amount(theme, "New amount", Some(&current))?;

    Ok(FormResult::Completed(EditExpenseData {
        category,
        index,
        amount,
    }))
}

fn option_costs(
    theme: &ColorfulTheme,
    label: &str,
    with_maintenance: bool,
) -> Result<OptionCosts, CommandError> {
    let fixed = prompt_amount(theme, &format!("{label}: fixed cost"), None)?;
    let pct = prompt_percentage(theme, &format!("{label}: commission %"))?;
    let mut option = OptionCosts::new(label, fixed, pct);
    if with_maintenance {
        if let Some(maintenance) =
            prompt_optional_amount(theme, &format!("{label}: maintenance (optional)"))?
        {
            option = option.with_maintenance(maintenance);
        }
    }
    Ok(option)
}

pub fn compare(
    theme: &ColorfulTheme,
    label_a: &str,
    label_b: &str,
) -> Result<FormResult<CompareData>, CommandError> {
    let gross = prompt_amount(theme, "Gross payout", None)?;
    let fuel = prompt_amount(theme, "Fuel cost", None)?;
    let option_a = option_costs(theme, label_a, false)?;
    let option_b = option_costs(theme, label_b, true)?;
    let hours = io::prompt_validated(theme, "Hours worked (optional)", Some(""), |value| {
        if value.trim().is_empty() {
            return Ok(());
        }
        match value.trim().replace(',', ".").parse::<f64>() {
            Ok(hours) if hours > 0.0 => Ok(()),
            Ok(_) => Err("hours must be greater than zero".into()),
            Err(_) => Err(format!("`{}` is not a number", value.trim())),
        }
    })?;
    let hours = match hours.trim() {
        "" => None,
        value => Some(value.replace(',', ".").parse::<f64>().map_err(|_| {
            CommandError::InvalidArguments(format!("`{value}` is not a number"))
        })?),
    };

    Ok(FormResult::Completed(CompareData {
        gross,
        fuel,
        option_a,
        option_b,
        hours,
    }))
}
