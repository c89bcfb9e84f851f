use crate::domain::{Category, Ledger};

/// Sum of amounts per category.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryTotals {
    pub monthly: f64,
    pub quarterly: f64,
    pub yearly: f64,
}

impl CategoryTotals {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Monthly => self.monthly,
            Category::Quarterly => self.quarterly,
            Category::Yearly => self.yearly,
        }
    }
}

/// Totals plus the yearly and per-month figures derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionReport {
    pub totals: CategoryTotals,
    pub annual: f64,
    pub monthly_average: f64,
}

pub struct ProjectionService;

impl ProjectionService {
    pub fn totals(ledger: &Ledger) -> CategoryTotals {
        let sum = |category| {
            ledger
                .records(category)
                .iter()
                .map(|record| record.amount())
                .sum::<f64>()
        };
        CategoryTotals {
            monthly: sum(Category::Monthly),
            quarterly: sum(Category::Quarterly),
            yearly: sum(Category::Yearly),
        }
    }

    pub fn annual_projection(totals: &CategoryTotals) -> f64 {
        totals.monthly * Category::Monthly.periods_per_year()
            + totals.quarterly * Category::Quarterly.periods_per_year()
            + totals.yearly * Category::Yearly.periods_per_year()
    }

    pub fn monthly_average(annual_projection: f64) -> f64 {
        annual_projection / 12.0
    }

    pub fn report(ledger: &Ledger) -> ProjectionReport {
        let totals = Self::totals(ledger);
        let annual = Self::annual_projection(&totals);
        ProjectionReport {
            totals,
            annual,
            monthly_average: Self::monthly_average(annual),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExpenseRecord;

    fn ledger_with(entries: &[(Category, &str, f64)]) -> Ledger {
        let mut ledger = Ledger::empty();
        for (category, name, amount) in entries {
            ledger
                .push(*category, ExpenseRecord::new(*name, *amount, None).unwrap())
                .unwrap();
        }
        ledger
    }

    #[test]
    fn totals_group_by_category() {
        let ledger = ledger_with(&[
            (Category::Monthly, "Renda", 450.0),
            (Category::Monthly, "Internet", 35.0),
            (Category::Quarterly, "Seguro", 90.0),
            (Category::Yearly, "IUC", 120.0),
        ]);
        let totals = ProjectionService::totals(&ledger);
        assert_eq!(
            totals,
            CategoryTotals {
                monthly: 485.0,
                quarterly: 90.0,
                yearly: 120.0
            }
        );
    }

    #[test]
    fn report_projects_year_and_month() {
        let ledger = ledger_with(&[
            (Category::Monthly, "Renda", 500.0),
            (Category::Quarterly, "Seguro", 100.0),
            (Category::Yearly, "IUC", 200.0),
        ]);
        let report = ProjectionService::report(&ledger);
        assert_eq!(report.annual, 500.0 * 12.0 + 100.0 * 4.0 + 200.0);
        assert_eq!(report.monthly_average, report.annual / 12.0);
    }

    #[test]
    fn empty_ledger_projects_zero() {
        let report = ProjectionService::report(&Ledger::empty());
        assert_eq!(report.totals, CategoryTotals::default());
        assert_eq!(report.annual, 0.0);
        assert_eq!(report.monthly_average, 0.0);
    }
}
