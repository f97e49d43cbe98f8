//! Built-in bracket tables for the 2021–2023 tax years.
//!
//! Deployments that need other years (or revised figures) supply their own
//! CSV via [`TaxTableLoader`](crate::TaxTableLoader) instead of editing
//! these.

use gelir_core::{BracketTable, TaxBracket, TaxTableSet};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn bracket(min: Decimal, max: Option<Decimal>, rate: Decimal) -> TaxBracket {
    TaxBracket {
        min_income: min,
        max_income: max,
        rate,
    }
}

/// The bracket tables shipped with the calculator.
pub fn builtin_tables() -> TaxTableSet {
    let tables = [
        BracketTable::new(
            2021,
            vec![
                bracket(dec!(0), Some(dec!(24000)), dec!(0.15)),
                bracket(dec!(24000), Some(dec!(53000)), dec!(0.20)),
                bracket(dec!(53000), Some(dec!(190000)), dec!(0.27)),
                bracket(dec!(190000), Some(dec!(650000)), dec!(0.35)),
                bracket(dec!(650000), None, dec!(0.40)),
            ],
        ),
        BracketTable::new(
            2022,
            vec![
                bracket(dec!(0), Some(dec!(32000)), dec!(0.15)),
                bracket(dec!(32000), Some(dec!(70000)), dec!(0.20)),
                bracket(dec!(70000), Some(dec!(170000)), dec!(0.27)),
                bracket(dec!(170000), Some(dec!(880000)), dec!(0.35)),
                bracket(dec!(880000), None, dec!(0.40)),
            ],
        ),
        BracketTable::new(
            2023,
            vec![
                bracket(dec!(0), Some(dec!(71337)), dec!(0.15)),
                bracket(dec!(71337), Some(dec!(156061)), dec!(0.20)),
                bracket(dec!(156061), Some(dec!(378981)), dec!(0.27)),
                bracket(dec!(378981), Some(dec!(1961784)), dec!(0.35)),
                bracket(dec!(1961784), None, dec!(0.40)),
            ],
        ),
    ];

    TaxTableSet::from_tables(
        tables
            .into_iter()
            .map(|table| table.expect("built-in bracket table is valid")),
    )
}
