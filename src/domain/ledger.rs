//! The categorized expense ledger and its persisted shape.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::core::errors::{LedgerError, Result};
use crate::domain::expense::ExpenseRecord;

/// Billing cadence of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "mensais")]
    Monthly,
    #[serde(rename = "trimestrais")]
    Quarterly,
    #[serde(rename = "anuais")]
    Yearly,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Monthly, Category::Quarterly, Category::Yearly];

    /// Key used in the persisted document.
    pub fn key(self) -> &'static str {
        match self {
            Category::Monthly => "mensais",
            Category::Quarterly => "trimestrais",
            Category::Yearly => "anuais",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Monthly => "Monthly",
            Category::Quarterly => "Quarterly",
            Category::Yearly => "Yearly",
        }
    }

    /// How many times the expense is paid in a year.
    pub fn periods_per_year(self) -> f64 {
        match self {
            Category::Monthly => 12.0,
            Category::Quarterly => 4.0,
            Category::Yearly => 1.0,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "mensais" | "mensal" | "monthly" | "month" | "m" => Ok(Category::Monthly),
            "trimestrais" | "trimestral" | "quarterly" | "quarter" | "q" => {
                Ok(Category::Quarterly)
            }
            "anuais" | "anual" | "yearly" | "year" | "y" => Ok(Category::Yearly),
            other => Err(LedgerError::NotFound(format!(
                "category `{other}` (expected mensais, trimestrais or anuais)"
            ))),
        }
    }
}

/// Expenses grouped by cadence. All three categories always exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(rename = "mensais", default)]
    monthly: Vec<ExpenseRecord>,
    #[serde(rename = "trimestrais", default)]
    quarterly: Vec<ExpenseRecord>,
    #[serde(rename = "anuais", default)]
    yearly: Vec<ExpenseRecord>,
}

const DEFAULT_MONTHLY: &[(&str, &str)] = &[
    ("Renda", "🏠"),
    ("Eletricidade", "⚡"),
    ("Água", "💧"),
    ("Internet", "🌐"),
    ("Telemóvel", "📱"),
    ("Supermercado", "🛒"),
];

const DEFAULT_QUARTERLY: &[(&str, &str)] = &[("Seguro", "🛡️"), ("Manutenção", "🛠️")];

const DEFAULT_YEARLY: &[(&str, &str)] = &[("IUC", "🚗"), ("Inspeção", "🔧"), ("Contabilista", "📑")];

impl Ledger {
    /// A ledger with no records in any category.
    pub fn empty() -> Self {
        Self {
            monthly: Vec::new(),
            quarterly: Vec::new(),
            yearly: Vec::new(),
        }
    }

    /// Every known expense, each at zero. Used when nothing usable is on disk.
    pub fn default_schema() -> Self {
        let build = |entries: &[(&str, &str)]| {
            entries
                .iter()
                .map(|(name, icon)| ExpenseRecord::placeholder(name, icon))
                .collect::<Vec<_>>()
        };
        Self {
            monthly: build(DEFAULT_MONTHLY),
            quarterly: build(DEFAULT_QUARTERLY),
            yearly: build(DEFAULT_YEARLY),
        }
    }

    pub fn records(&self, category: Category) -> &[ExpenseRecord] {
        match category {
            Category::Monthly => &self.monthly,
            Category::Quarterly => &self.quarterly,
            Category::Yearly => &self.yearly,
        }
    }

    fn records_mut(&mut self, category: Category) -> &mut Vec<ExpenseRecord> {
        match category {
            Category::Monthly => &mut self.monthly,
            Category::Quarterly => &mut self.quarterly,
            Category::Yearly => &mut self.yearly,
        }
    }

    /// Iterates categories in display order alongside their records.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &[ExpenseRecord])> + '_ {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.records(category)))
    }

    pub fn record_count(&self) -> usize {
        self.monthly.len() + self.quarterly.len() + self.yearly.len()
    }

    pub fn contains(&self, category: Category, name: &str) -> bool {
        self.records(category)
            .iter()
            .any(|record| same_name(record.name(), name))
    }

    /// Appends a record, refusing a name already used in the category.
    pub fn push(&mut self, category: Category, record: ExpenseRecord) -> Result<()> {
        if self.contains(category, record.name()) {
            return Err(LedgerError::Validation(format!(
                "an expense named `{}` already exists in {}",
                record.name(),
                category.key()
            )));
        }
        self.records_mut(category).push(record);
        Ok(())
    }

    pub fn record_mut(&mut self, category: Category, index: usize) -> Result<&mut ExpenseRecord> {
        let records = self.records_mut(category);
        let len = records.len();
        records.get_mut(index).ok_or_else(|| {
            LedgerError::NotFound(format!(
                "no expense at position {} in {} ({} available)",
                index + 1,
                category.key(),
                len
            ))
        })
    }

    /// Names repeated within a category, which older documents may carry.
    pub fn duplicate_names(&self) -> Vec<(Category, String)> {
        let mut duplicates = Vec::new();
        for (category, records) in self.categories() {
            for (index, record) in records.iter().enumerate() {
                let repeated = records[..index]
                    .iter()
                    .any(|earlier| same_name(earlier.name(), record.name()));
                if repeated {
                    duplicates.push((category, record.name().to_string()));
                }
            }
        }
        duplicates
    }
}

fn same_name(left: &str, right: &str) -> bool {
    left.trim().to_lowercase() == right.trim().to_lowercase()
}
