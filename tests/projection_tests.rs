use sobra_core::{
    core::services::{CategoryTotals, ProjectionService},
    domain::{Category, ExpenseRecord, Ledger},
};

fn ledger_from(entries: &[(Category, &str, f64)]) -> Ledger {
    let mut ledger = Ledger::empty();
    for (category, name, amount) in entries {
        ledger
            .push(*category, ExpenseRecord::new(*name, *amount, None).unwrap())
            .unwrap();
    }
    ledger
}

const ENTRIES: &[(Category, &str, f64)] = &[
    (Category::Monthly, "Renda", 450.0),
    (Category::Yearly, "IUC", 120.0),
    (Category::Monthly, "Internet", 35.0),
    (Category::Quarterly, "Seguro", 90.0),
    (Category::Monthly, "Água", 20.0),
    (Category::Yearly, "Inspeção", 35.0),
];

#[test]
fn totals_do_not_depend_on_insertion_order() {
    let forward = ProjectionService::totals(&ledger_from(ENTRIES));
    let reversed: Vec<_> = ENTRIES.iter().rev().copied().collect();
    let backward = ProjectionService::totals(&ledger_from(&reversed));

    assert_eq!(forward, backward);
    assert_eq!(forward.monthly, 505.0);
    assert_eq!(forward.quarterly, 90.0);
    assert_eq!(forward.yearly, 155.0);
}

#[test]
fn annual_projection_weights_each_category() {
    let totals = CategoryTotals {
        monthly: 505.0,
        quarterly: 90.0,
        yearly: 155.0,
    };
    let annual = ProjectionService::annual_projection(&totals);
    assert_eq!(
        annual,
        totals.monthly * 12.0 + totals.quarterly * 4.0 + totals.yearly
    );
    assert_eq!(annual, 6575.0);
}

#[test]
fn report_for_default_schema_is_zero() {
    let report = ProjectionService::report(&Ledger::default_schema());
    assert_eq!(report.annual, 0.0);
    assert_eq!(report.monthly_average, 0.0);
}

#[test]
fn monthly_average_is_a_twelfth() {
    let report = ProjectionService::report(&ledger_from(ENTRIES));
    assert_eq!(report.monthly_average, report.annual / 12.0);
}
