mod bracket;
mod calculation;
mod deduction;
mod table;

pub use bracket::{BracketLabels, TaxBracket};
pub use calculation::{BracketTax, CalculationInput, CalculationResult};
pub use deduction::{DeductionKind, DeductionLine};
pub use table::{BracketTable, BracketTableError, TaxTableSet};
