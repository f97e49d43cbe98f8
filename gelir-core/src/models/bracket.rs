use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format;

/// One progressive tax bracket: income in `[min_income, max_income)` is
/// taxed at the marginal `rate`. `max_income: None` marks the final,
/// unbounded bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    /// Width of the bracket, `None` for the unbounded final bracket.
    pub fn span(&self) -> Option<Decimal> {
        self.max_income.map(|max| max - self.min_income)
    }

    /// Display labels for this bracket. Bracket boundaries never change at
    /// runtime, so [`BracketTable`](crate::BracketTable) computes these once
    /// per table rather than per calculation.
    pub fn labels(&self) -> BracketLabels {
        BracketLabels {
            min: format::format_amount(self.min_income, format::DEFAULT_CURRENCY),
            max: format::format_opt_amount(self.max_income, format::DEFAULT_CURRENCY),
            rate: format::format_rate(self.rate),
        }
    }
}

/// Pre-formatted display labels for one bracket: grouped amount strings for
/// the bounds (the sentinel for an unbounded upper bound) and the rate as an
/// integer percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketLabels {
    pub min: String,
    pub max: String,
    pub rate: String,
}
