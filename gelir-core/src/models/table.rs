use std::collections::BTreeMap;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::bracket::{BracketLabels, TaxBracket};

/// Errors raised when a bracket list does not partition `[0, ∞)`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    /// The bracket list is empty.
    #[error("tax year {0} has no brackets")]
    Empty(i32),

    /// A bracket does not start where the previous one ended (the first
    /// bracket must start at 0).
    #[error("tax year {year}: bracket starts at {found}, expected {expected}")]
    Discontiguous {
        year: i32,
        expected: Decimal,
        found: Decimal,
    },

    /// A bracket's upper bound is not above its lower bound.
    #[error("tax year {year}: bracket at {min} has max {max}, which is not above it")]
    EmptySpan { year: i32, min: Decimal, max: Decimal },

    /// An unbounded bracket appears before the end of the list.
    #[error("tax year {year}: only the final bracket may be unbounded")]
    UnboundedBeforeEnd { year: i32 },

    /// The final bracket has an upper bound, leaving high incomes uncovered.
    #[error("tax year {year}: final bracket must be unbounded")]
    BoundedEnd { year: i32 },

    /// A rate lies outside `[0, 1]`.
    #[error("tax year {year}: rate {rate} is outside [0, 1]")]
    RateOutOfRange { year: i32, rate: Decimal },
}

/// The ordered bracket list for one tax year.
///
/// Construction validates that the brackets are ascending, contiguous and
/// non-overlapping, start at 0, and end with a single unbounded bracket, so
/// a held `BracketTable` always partitions `[0, ∞)`. Display labels are
/// computed here, once per table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTable {
    tax_year: i32,
    brackets: Vec<TaxBracket>,
    labels: Vec<BracketLabels>,
}

impl BracketTable {
    /// Validates `brackets` and builds the table for `tax_year`.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError`] if the list is empty, has a gap or
    /// overlap, carries a bounded final bracket or an unbounded inner one,
    /// or contains a rate outside `[0, 1]`.
    pub fn new(tax_year: i32, brackets: Vec<TaxBracket>) -> Result<Self, BracketTableError> {
        if brackets.is_empty() {
            return Err(BracketTableError::Empty(tax_year));
        }

        let last = brackets.len() - 1;
        let mut expected_min = Decimal::ZERO;

        for (idx, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(BracketTableError::RateOutOfRange {
                    year: tax_year,
                    rate: bracket.rate,
                });
            }
            if bracket.min_income != expected_min {
                return Err(BracketTableError::Discontiguous {
                    year: tax_year,
                    expected: expected_min,
                    found: bracket.min_income,
                });
            }
            match bracket.max_income {
                Some(max) if max <= bracket.min_income => {
                    return Err(BracketTableError::EmptySpan {
                        year: tax_year,
                        min: bracket.min_income,
                        max,
                    });
                }
                Some(max) => {
                    if idx == last {
                        return Err(BracketTableError::BoundedEnd { year: tax_year });
                    }
                    expected_min = max;
                }
                None => {
                    if idx != last {
                        return Err(BracketTableError::UnboundedBeforeEnd { year: tax_year });
                    }
                }
            }
        }

        let labels = brackets.iter().map(TaxBracket::labels).collect();

        Ok(Self {
            tax_year,
            brackets,
            labels,
        })
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Display labels, one per bracket, in bracket order.
    pub fn labels(&self) -> &[BracketLabels] {
        &self.labels
    }
}

/// Ordered mapping from tax year to its bracket table.
///
/// Static reference data: built once at load time and injected into the
/// calculation engine, never mutated during calculations.
#[derive(Debug, Clone, Default)]
pub struct TaxTableSet {
    tables: BTreeMap<i32, BracketTable>,
}

impl TaxTableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: impl IntoIterator<Item = BracketTable>) -> Self {
        let mut set = Self::new();
        for table in tables {
            set.insert(table);
        }
        set
    }

    /// Adds a table, replacing any existing table for the same year.
    pub fn insert(&mut self, table: BracketTable) {
        self.tables.insert(table.tax_year(), table);
    }

    /// The table for `year`, if one is configured. Callers must guard the
    /// missing case.
    pub fn get(&self, year: i32) -> Option<&BracketTable> {
        self.tables.get(&year)
    }

    /// Configured years, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.tables.keys().copied()
    }

    /// The most recent configured year.
    pub fn latest_year(&self) -> Option<i32> {
        self.tables.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn bracket(min: Decimal, max: Option<Decimal>, rate: Decimal) -> TaxBracket {
        TaxBracket {
            min_income: min,
            max_income: max,
            rate,
        }
    }

    fn valid_brackets() -> Vec<TaxBracket> {
        vec![
            bracket(dec!(0), Some(dec!(32000)), dec!(0.15)),
            bracket(dec!(32000), Some(dec!(70000)), dec!(0.20)),
            bracket(dec!(70000), None, dec!(0.27)),
        ]
    }

    #[test]
    fn new_accepts_contiguous_brackets() {
        let table = BracketTable::new(2022, valid_brackets()).unwrap();

        assert_eq!(table.tax_year(), 2022);
        assert_eq!(table.brackets().len(), 3);
        assert_eq!(table.labels().len(), 3);
    }

    #[test]
    fn new_precomputes_labels_in_bracket_order() {
        let table = BracketTable::new(2022, valid_brackets()).unwrap();

        assert_eq!(table.labels()[0].min, "0 TRY");
        assert_eq!(table.labels()[1].max, "70.000 TRY");
        assert_eq!(table.labels()[2].max, "-");
        assert_eq!(table.labels()[2].rate, "%27");
    }

    #[test]
    fn new_rejects_empty_list() {
        let result = BracketTable::new(2022, vec![]);

        assert_eq!(result.unwrap_err(), BracketTableError::Empty(2022));
    }

    #[test]
    fn new_rejects_first_bracket_not_starting_at_zero() {
        let brackets = vec![
            bracket(dec!(100), Some(dec!(32000)), dec!(0.15)),
            bracket(dec!(32000), None, dec!(0.20)),
        ];

        let result = BracketTable::new(2022, brackets);

        assert_eq!(
            result.unwrap_err(),
            BracketTableError::Discontiguous {
                year: 2022,
                expected: dec!(0),
                found: dec!(100),
            }
        );
    }

    #[test]
    fn new_rejects_gap_between_brackets() {
        let brackets = vec![
            bracket(dec!(0), Some(dec!(32000)), dec!(0.15)),
            bracket(dec!(33000), None, dec!(0.20)),
        ];

        let result = BracketTable::new(2022, brackets);

        assert_eq!(
            result.unwrap_err(),
            BracketTableError::Discontiguous {
                year: 2022,
                expected: dec!(32000),
                found: dec!(33000),
            }
        );
    }

    #[test]
    fn new_rejects_overlapping_brackets() {
        let brackets = vec![
            bracket(dec!(0), Some(dec!(32000)), dec!(0.15)),
            bracket(dec!(31000), None, dec!(0.20)),
        ];

        let result = BracketTable::new(2022, brackets);

        assert!(matches!(
            result.unwrap_err(),
            BracketTableError::Discontiguous { .. }
        ));
    }

    #[test]
    fn new_rejects_bounded_final_bracket() {
        let brackets = vec![
            bracket(dec!(0), Some(dec!(32000)), dec!(0.15)),
            bracket(dec!(32000), Some(dec!(70000)), dec!(0.20)),
        ];

        let result = BracketTable::new(2022, brackets);

        assert_eq!(
            result.unwrap_err(),
            BracketTableError::BoundedEnd { year: 2022 }
        );
    }

    #[test]
    fn new_rejects_unbounded_inner_bracket() {
        let brackets = vec![
            bracket(dec!(0), None, dec!(0.15)),
            bracket(dec!(32000), None, dec!(0.20)),
        ];

        let result = BracketTable::new(2022, brackets);

        assert_eq!(
            result.unwrap_err(),
            BracketTableError::UnboundedBeforeEnd { year: 2022 }
        );
    }

    #[test]
    fn new_rejects_inverted_bounds() {
        let brackets = vec![
            bracket(dec!(0), Some(dec!(0)), dec!(0.15)),
            bracket(dec!(0), None, dec!(0.20)),
        ];

        let result = BracketTable::new(2022, brackets);

        assert_eq!(
            result.unwrap_err(),
            BracketTableError::EmptySpan {
                year: 2022,
                min: dec!(0),
                max: dec!(0),
            }
        );
    }

    #[test]
    fn new_rejects_rate_above_one() {
        let brackets = vec![bracket(dec!(0), None, dec!(1.5))];

        let result = BracketTable::new(2022, brackets);

        assert_eq!(
            result.unwrap_err(),
            BracketTableError::RateOutOfRange {
                year: 2022,
                rate: dec!(1.5),
            }
        );
    }

    #[test]
    fn new_rejects_negative_rate() {
        let brackets = vec![bracket(dec!(0), None, dec!(-0.1))];

        let result = BracketTable::new(2022, brackets);

        assert!(matches!(
            result.unwrap_err(),
            BracketTableError::RateOutOfRange { .. }
        ));
    }

    #[test]
    fn table_set_orders_years_and_tracks_latest() {
        let set = TaxTableSet::from_tables([
            BracketTable::new(2023, valid_brackets()).unwrap(),
            BracketTable::new(2021, valid_brackets()).unwrap(),
            BracketTable::new(2022, valid_brackets()).unwrap(),
        ]);

        assert_eq!(set.years().collect::<Vec<_>>(), vec![2021, 2022, 2023]);
        assert_eq!(set.latest_year(), Some(2023));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn table_set_get_missing_year_is_none() {
        let set = TaxTableSet::from_tables([BracketTable::new(2022, valid_brackets()).unwrap()]);

        assert!(set.get(2020).is_none());
        assert!(set.get(2022).is_some());
    }

    #[test]
    fn table_set_insert_replaces_same_year() {
        let mut set = TaxTableSet::new();
        set.insert(BracketTable::new(2022, valid_brackets()).unwrap());
        set.insert(
            BracketTable::new(2022, vec![bracket(dec!(0), None, dec!(0.10))]).unwrap(),
        );

        assert_eq!(set.len(), 1);
        assert_eq!(set.get(2022).unwrap().brackets().len(), 1);
    }

    #[test]
    fn empty_table_set() {
        let set = TaxTableSet::new();

        assert!(set.is_empty());
        assert_eq!(set.latest_year(), None);
    }
}
