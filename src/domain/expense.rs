//! Expense records stored inside the ledger document.

use serde::{Deserialize, Serialize};

use crate::core::errors::{LedgerError, Result};

/// A single named expense and the amount it costs per period.
///
/// Records are validated when built, including when they are read back from
/// disk, so a record in memory always has a non-empty name and a finite,
/// non-negative amount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawExpenseRecord")]
pub struct ExpenseRecord {
    #[serde(rename = "nome")]
    name: String,
    #[serde(rename = "valor")]
    amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
}

#[derive(Deserialize)]
struct RawExpenseRecord {
    nome: String,
    valor: f64,
    #[serde(default)]
    icon: Option<String>,
}

impl TryFrom<RawExpenseRecord> for ExpenseRecord {
    type Error = LedgerError;

    fn try_from(raw: RawExpenseRecord) -> Result<Self> {
        Self::new(raw.nome, raw.valor, raw.icon)
    }
}

impl ExpenseRecord {
    pub fn new(name: impl Into<String>, amount: f64, icon: Option<String>) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(LedgerError::Validation(
                "expense name must not be empty".into(),
            ));
        }
        validate_amount(amount)?;
        let icon = icon
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Ok(Self { name, amount, icon })
    }

    /// Zero-amount record for the built-in default schema.
    pub(crate) fn placeholder(name: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            amount: 0.0,
            icon: Some(icon.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn set_amount(&mut self, amount: f64) -> Result<()> {
        validate_amount(amount)?;
        self.amount = amount;
        Ok(())
    }

    /// Name prefixed with the icon when one is set.
    pub fn display_label(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{icon} {}", self.name),
            None => self.name.clone(),
        }
    }
}

pub fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(LedgerError::Validation(format!(
            "amount `{amount}` is not a number"
        )));
    }
    if amount < 0.0 {
        return Err(LedgerError::Validation(format!(
            "amount must not be negative (got {amount})"
        )));
    }
    Ok(())
}

/// Parses user-entered money, accepting a decimal comma and a trailing `€`.
pub fn parse_amount(input: &str) -> Result<f64> {
    let trimmed = input.trim().trim_end_matches('€').trim();
    if trimmed.is_empty() {
        return Err(LedgerError::Validation("amount is required".into()));
    }
    let normalized = trimmed.replace(',', ".");
    let amount = normalized
        .parse::<f64>()
        .map_err(|_| LedgerError::Validation(format!("`{}` is not a valid amount", input.trim())))?;
    validate_amount(amount)?;
    Ok(amount)
}
