pub mod expense;
pub mod ledger;
pub mod scenario;

pub use expense::{parse_amount, ExpenseRecord};
pub use ledger::{Category, Ledger};
pub use scenario::{Comparison, OptionCosts, OptionOutcome, ScenarioInputs, Winner};
