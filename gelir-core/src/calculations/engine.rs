//! The progressive income tax pipeline.
//!
//! One calculation runs the following steps, in order. The exemption order
//! is fixed policy: each exemption applies to the base already reduced by
//! the ones before it.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Base taxable amount = gross income |
//! | 2    | Subtract expenses (positive expenses only) |
//! | 3    | Software-export exemption: halve the taxable amount |
//! | 4    | Under-29 exemption: remove up to the ceiling, floored at 0 |
//! | 5    | Record "Total Deduction" and "Total Taxables" summary lines |
//! | 6    | Walk the brackets once, taxing each slice at its marginal rate |
//! | 7    | Net income = income − total tax − mandatory contribution |
//! | 8    | Effective rate = total tax / income (undefined at zero income) |
//!
//! The engine is a pure function over the injected table set and policy:
//! no I/O, no shared state, identical input always yields identical output.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use gelir_core::calculations::{Calculator, CalculatorPolicy};
//! use gelir_core::{BracketTable, CalculationInput, TaxBracket, TaxTableSet};
//!
//! let table = BracketTable::new(2022, vec![
//!     TaxBracket { min_income: dec!(0), max_income: Some(dec!(32000)), rate: dec!(0.15) },
//!     TaxBracket { min_income: dec!(32000), max_income: Some(dec!(70000)), rate: dec!(0.20) },
//!     TaxBracket { min_income: dec!(70000), max_income: Some(dec!(170000)), rate: dec!(0.27) },
//!     TaxBracket { min_income: dec!(170000), max_income: Some(dec!(880000)), rate: dec!(0.35) },
//!     TaxBracket { min_income: dec!(880000), max_income: None, rate: dec!(0.40) },
//! ]).unwrap();
//!
//! let calculator = Calculator::new(
//!     TaxTableSet::from_tables([table]),
//!     CalculatorPolicy::default(),
//! );
//!
//! let result = calculator.calculate(&CalculationInput {
//!     tax_year: 2022,
//!     income: dec!(100000),
//!     expenses: dec!(0),
//!     exempt_export_software: false,
//!     exempt_under29: false,
//!     contribution_tier: 0,
//! }).unwrap();
//!
//! assert_eq!(result.total_tax, dec!(20500));
//! assert_eq!(result.net_income, dec!(79500));
//! assert_eq!(result.effective_tax_rate, Some(dec!(0.205)));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::{
    BracketTable, BracketTax, CalculationInput, CalculationResult, DeductionKind, DeductionLine,
    TaxTableSet,
};

/// Errors that can occur during a calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// No bracket table is configured for the requested year.
    #[error("no bracket table configured for tax year {0}")]
    UnknownTaxYear(i32),

    /// Income must be non-negative.
    #[error("income must be non-negative, got {0}")]
    NegativeIncome(Decimal),
}

/// The per-deployment mandatory-contribution variant: a flat annual premium
/// per selectable tier, deducted from net income after bracket tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionPolicy {
    pub annual_premium_per_tier: Decimal,
}

impl Default for ContributionPolicy {
    fn default() -> Self {
        Self {
            annual_premium_per_tier: Decimal::from(12_660),
        }
    }
}

/// Policy knobs that vary between deployments of the calculator. Both
/// variants (with and without the mandatory contribution) share the same
/// bracket-walking algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorPolicy {
    /// Fixed ceiling of the under-29 exemption.
    pub under29_ceiling: Decimal,

    /// Mandatory-contribution variant; `None` omits the line item entirely.
    pub contribution: Option<ContributionPolicy>,
}

impl Default for CalculatorPolicy {
    fn default() -> Self {
        Self {
            under29_ceiling: Decimal::from(75_000),
            contribution: None,
        }
    }
}

/// The calculation engine: an immutable table set plus deployment policy.
#[derive(Debug, Clone)]
pub struct Calculator {
    tables: TaxTableSet,
    policy: CalculatorPolicy,
}

impl Calculator {
    pub fn new(tables: TaxTableSet, policy: CalculatorPolicy) -> Self {
        Self { tables, policy }
    }

    pub fn tables(&self) -> &TaxTableSet {
        &self.tables
    }

    /// The bracket table for `year`, if configured.
    pub fn table(&self, year: i32) -> Option<&BracketTable> {
        self.tables.get(year)
    }

    /// Runs the full pipeline for `input`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError`] if `input.income` is negative or no
    /// table exists for `input.tax_year`.
    pub fn calculate(
        &self,
        input: &CalculationInput,
    ) -> Result<CalculationResult, CalculationError> {
        if input.income < Decimal::ZERO {
            return Err(CalculationError::NegativeIncome(input.income));
        }
        let table = self
            .tables
            .get(input.tax_year)
            .ok_or(CalculationError::UnknownTaxYear(input.tax_year))?;

        let income = input.income;
        let (taxable_amount, deductions) = self.apply_deductions(input);
        let (bracket_taxes, total_tax) = walk_brackets(table, taxable_amount);

        let contribution_amount = self.contribution_amount(input);
        let net_income = income - total_tax - contribution_amount;
        let effective_tax_rate = if income.is_zero() {
            None
        } else {
            Some(total_tax / income)
        };

        Ok(CalculationResult {
            tax_year: input.tax_year,
            income,
            expenses: input.expenses,
            brackets: table.brackets().to_vec(),
            deductions,
            taxable_amount,
            bracket_taxes,
            total_tax,
            contribution_amount,
            net_income,
            effective_tax_rate,
        })
    }

    /// Steps 1–5: reduces gross income to the taxable amount, recording the
    /// audit trail.
    fn apply_deductions(&self, input: &CalculationInput) -> (Decimal, Vec<DeductionLine>) {
        let income = input.income;
        let mut taxable = income;
        let mut deductions = vec![DeductionLine::new(DeductionKind::BaseIncome, income)];

        if input.expenses > Decimal::ZERO {
            taxable -= input.expenses;
            deductions.push(DeductionLine::new(DeductionKind::Expenses, -input.expenses));
        } else if input.expenses < Decimal::ZERO {
            warn!(expenses = %input.expenses, "negative expenses ignored");
        }

        if input.exempt_export_software {
            let exempt = taxable / Decimal::TWO;
            taxable -= exempt;
            deductions.push(DeductionLine::new(DeductionKind::ExportExemption, -exempt));
        }

        if input.exempt_under29 {
            // The recorded line and the new taxable amount both derive from
            // `consumed`, so they cannot drift apart if the ceiling becomes
            // per-year data.
            let consumed = taxable.min(self.policy.under29_ceiling).max(Decimal::ZERO);
            taxable -= consumed;
            deductions.push(DeductionLine::new(
                DeductionKind::Under29Exemption,
                -consumed,
            ));
        }

        deductions.push(DeductionLine::new(
            DeductionKind::TotalDeduction,
            income - taxable,
        ));
        deductions.push(DeductionLine::new(DeductionKind::TotalTaxable, taxable));

        (taxable, deductions)
    }

    /// Step 7's contribution term. The under-29 exemption waives the
    /// contribution along with the tax ceiling.
    fn contribution_amount(&self, input: &CalculationInput) -> Decimal {
        if input.exempt_under29 {
            return Decimal::ZERO;
        }
        match &self.policy.contribution {
            Some(policy) if input.contribution_tier > 0 => {
                Decimal::from(input.contribution_tier) * policy.annual_premium_per_tier
            }
            _ => Decimal::ZERO,
        }
    }
}

/// Step 6: one pass over the ordered brackets. `remaining` starts from the
/// taxable amount floored at 0, so per-bracket amounts are never negative.
fn walk_brackets(table: &BracketTable, taxable_amount: Decimal) -> (Vec<BracketTax>, Decimal) {
    let mut remaining = taxable_amount.max(Decimal::ZERO);
    let mut total_tax = Decimal::ZERO;
    let mut bracket_taxes = Vec::with_capacity(table.brackets().len());

    for bracket in table.brackets() {
        let applicable_amount = match bracket.span() {
            Some(span) => remaining.min(span),
            None => remaining,
        };
        let tax_amount = applicable_amount * bracket.rate;
        remaining -= applicable_amount;
        total_tax += tax_amount;
        bracket_taxes.push(BracketTax {
            applicable_amount,
            tax_amount,
        });
    }

    (bracket_taxes, total_tax)
}
