//! Calculation logic for progressive income tax.

pub mod engine;

pub use engine::{CalculationError, Calculator, CalculatorPolicy, ContributionPolicy};
