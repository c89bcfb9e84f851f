use crate::core::errors::{LedgerError, Result};
use crate::domain::{Comparison, OptionCosts, OptionOutcome, ScenarioInputs, Winner};

pub struct ComparisonService;

impl ComparisonService {
    /// Net payout of both options and which one leaves more.
    ///
    /// Fails with [`LedgerError::Division`] when hours worked are supplied but
    /// not positive.
    pub fn compare_options(scenario: &ScenarioInputs) -> Result<Comparison> {
        let hours = match scenario.hours_worked() {
            Some(hours) if hours <= 0.0 => return Err(LedgerError::Division(hours)),
            other => other,
        };

        let option_a = Self::outcome(scenario, scenario.option_a(), hours);
        let option_b = Self::outcome(scenario, scenario.option_b(), hours);

        let winner = if option_a.net > option_b.net {
            Winner::OptionA
        } else if option_b.net > option_a.net {
            Winner::OptionB
        } else {
            Winner::Tie
        };
        let delta = option_b.net - option_a.net;

        Ok(Comparison {
            net_after_fuel: scenario.gross_payout() - scenario.fuel_cost(),
            option_a,
            option_b,
            winner,
            delta,
        })
    }

    /// `gross - commission - fixed - fuel - maintenance` for one option.
    pub fn net_for(scenario: &ScenarioInputs, option: &OptionCosts) -> f64 {
        let gross = scenario.gross_payout();
        gross
            - Self::commission(gross, option)
            - option.fixed_cost
            - scenario.fuel_cost()
            - option.maintenance.unwrap_or(0.0)
    }

    fn commission(gross: f64, option: &OptionCosts) -> f64 {
        gross * option.commission_pct / 100.0
    }

    fn outcome(scenario: &ScenarioInputs, option: &OptionCosts, hours: Option<f64>) -> OptionOutcome {
        let commission = Self::commission(scenario.gross_payout(), option);
        let net = Self::net_for(scenario, option);
        OptionOutcome {
            label: option.label.clone(),
            commission,
            deductions: scenario.gross_payout() - net,
            net,
            net_per_hour: hours.map(|hours| net / hours),
        }
    }
}
