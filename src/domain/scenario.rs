//! Inputs and outcomes of an earnings comparison between two vehicle options.

use std::fmt;

use crate::core::errors::{LedgerError, Result};

/// Costs that depend on which vehicle option the driver picks.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionCosts {
    pub label: String,
    pub fixed_cost: f64,
    pub commission_pct: f64,
    pub maintenance: Option<f64>,
}

impl OptionCosts {
    pub fn new(label: impl Into<String>, fixed_cost: f64, commission_pct: f64) -> Self {
        Self {
            label: label.into(),
            fixed_cost,
            commission_pct,
            maintenance: None,
        }
    }

    pub fn with_maintenance(mut self, maintenance: f64) -> Self {
        self.maintenance = Some(maintenance);
        self
    }

    fn validate(&self) -> Result<()> {
        non_negative(&format!("{} fixed cost", self.label), self.fixed_cost)?;
        if let Some(maintenance) = self.maintenance {
            non_negative(&format!("{} maintenance", self.label), maintenance)?;
        }
        if !self.commission_pct.is_finite() || !(0.0..=100.0).contains(&self.commission_pct) {
            return Err(LedgerError::Validation(format!(
                "{} commission must be between 0 and 100 (got {})",
                self.label, self.commission_pct
            )));
        }
        Ok(())
    }
}

/// One comparison request. Built once from user input and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioInputs {
    gross_payout: f64,
    fuel_cost: f64,
    option_a: OptionCosts,
    option_b: OptionCosts,
    hours_worked: Option<f64>,
}

impl ScenarioInputs {
    pub fn new(
        gross_payout: f64,
        fuel_cost: f64,
        option_a: OptionCosts,
        option_b: OptionCosts,
        hours_worked: Option<f64>,
    ) -> Result<Self> {
        non_negative("gross payout", gross_payout)?;
        non_negative("fuel cost", fuel_cost)?;
        option_a.validate()?;
        option_b.validate()?;
        if let Some(hours) = hours_worked {
            if !hours.is_finite() {
                return Err(LedgerError::Validation(format!(
                    "hours worked `{hours}` is not a number"
                )));
            }
        }
        Ok(Self {
            gross_payout,
            fuel_cost,
            option_a,
            option_b,
            hours_worked,
        })
    }

    pub fn gross_payout(&self) -> f64 {
        self.gross_payout
    }

    pub fn fuel_cost(&self) -> f64 {
        self.fuel_cost
    }

    pub fn option_a(&self) -> &OptionCosts {
        &self.option_a
    }

    pub fn option_b(&self) -> &OptionCosts {
        &self.option_b
    }

    pub fn hours_worked(&self) -> Option<f64> {
        self.hours_worked
    }

    /// Same scenario with the two options exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            option_a: self.option_b.clone(),
            option_b: self.option_a.clone(),
            ..self.clone()
        }
    }
}

fn non_negative(label: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(LedgerError::Validation(format!(
            "{label} `{value}` is not a number"
        )));
    }
    if value < 0.0 {
        return Err(LedgerError::Validation(format!(
            "{label} must not be negative (got {value})"
        )));
    }
    Ok(())
}

/// Which option leaves more money on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    OptionA,
    OptionB,
    Tie,
}

impl Winner {
    pub fn swapped(self) -> Self {
        match self {
            Winner::OptionA => Winner::OptionB,
            Winner::OptionB => Winner::OptionA,
            Winner::Tie => Winner::Tie,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::OptionA => f.write_str("option A"),
            Winner::OptionB => f.write_str("option B"),
            Winner::Tie => f.write_str("tie"),
        }
    }
}

/// Breakdown of one option's payout.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionOutcome {
    pub label: String,
    pub commission: f64,
    pub deductions: f64,
    pub net: f64,
    pub net_per_hour: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Gross payout minus fuel, before any option-specific cost.
    pub net_after_fuel: f64,
    pub option_a: OptionOutcome,
    pub option_b: OptionOutcome,
    pub winner: Winner,
    /// `option_b.net - option_a.net`.
    pub delta: f64,
}

impl Comparison {
    /// Absolute difference between the two nets.
    pub fn margin(&self) -> f64 {
        self.delta.abs()
    }

    pub fn winning_outcome(&self) -> Option<&OptionOutcome> {
        match self.winner {
            Winner::OptionA => Some(&self.option_a),
            Winner::OptionB => Some(&self.option_b),
            Winner::Tie => None,
        }
    }
}
