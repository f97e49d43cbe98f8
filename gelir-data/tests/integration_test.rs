//! End-to-end tests: CSV bracket data through the loader into the
//! calculation engine.

use gelir_core::calculations::{Calculator, CalculatorPolicy, ContributionPolicy};
use gelir_core::CalculationInput;
use gelir_data::{builtin_tables, TaxTableLoader};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const TEST_CSV: &str = include_str!("../test-data/tax_brackets.csv");

fn input(tax_year: i32, income: Decimal) -> CalculationInput {
    CalculationInput {
        tax_year,
        income,
        expenses: dec!(0),
        exempt_export_software: false,
        exempt_under29: false,
        contribution_tier: 0,
    }
}

#[test]
fn csv_fixture_matches_builtin_tables() {
    let loaded = TaxTableLoader::load(TEST_CSV.as_bytes()).expect("failed to load fixture");
    let builtin = builtin_tables();

    assert_eq!(
        loaded.years().collect::<Vec<_>>(),
        builtin.years().collect::<Vec<_>>()
    );
    for year in builtin.years().collect::<Vec<_>>() {
        assert_eq!(
            loaded.get(year).unwrap().brackets(),
            builtin.get(year).unwrap().brackets(),
            "year {year}"
        );
    }
}

#[test]
fn loaded_tables_drive_a_full_calculation() {
    let tables = TaxTableLoader::load(TEST_CSV.as_bytes()).expect("failed to load fixture");
    let calculator = Calculator::new(tables, CalculatorPolicy::default());

    let result = calculator.calculate(&input(2022, dec!(100000))).unwrap();

    assert_eq!(result.total_tax, dec!(20500));
    assert_eq!(result.net_income, dec!(79500));
    assert_eq!(result.effective_tax_rate, Some(dec!(0.205)));
}

#[test]
fn builtin_tables_cover_every_year_end_to_end() {
    let calculator = Calculator::new(builtin_tables(), CalculatorPolicy::default());

    for year in [2021, 2022, 2023] {
        let result = calculator.calculate(&input(year, dec!(500000))).unwrap();
        assert!(result.total_tax > dec!(0), "year {year}");
        assert_eq!(result.bracket_taxes.len(), 5, "year {year}");
    }
}

#[test]
fn contribution_variant_against_loaded_tables() {
    let tables = TaxTableLoader::load(TEST_CSV.as_bytes()).expect("failed to load fixture");
    let calculator = Calculator::new(
        tables,
        CalculatorPolicy {
            contribution: Some(ContributionPolicy::default()),
            ..CalculatorPolicy::default()
        },
    );

    let mut case = input(2022, dec!(100000));
    case.contribution_tier = 1;

    let result = calculator.calculate(&case).unwrap();

    assert_eq!(result.contribution_amount, dec!(12660));
    assert_eq!(result.net_income, dec!(100000) - dec!(20500) - dec!(12660));
}
