pub mod calculations;
pub mod format;
pub mod models;

pub use calculations::{CalculationError, Calculator, CalculatorPolicy, ContributionPolicy};
pub use models::*;
