use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::bracket::TaxBracket;
use crate::models::deduction::DeductionLine;

/// Input fields for one calculation, as read off the form or command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Tax year selecting the bracket table.
    pub tax_year: i32,

    /// Gross income. Must be non-negative; the engine rejects anything else.
    pub income: Decimal,

    /// Deductible expenses. Non-positive values are ignored.
    pub expenses: Decimal,

    /// Software-export exemption: halves the taxable base.
    pub exempt_export_software: bool,

    /// Under-29 exemption: removes up to the configured ceiling from the
    /// taxable base and waives the mandatory contribution.
    pub exempt_under29: bool,

    /// Mandatory-contribution tier. 0 means no contribution. Only
    /// meaningful when the engine's contribution policy is enabled.
    pub contribution_tier: u32,
}

/// Tax owed within one bracket, in bracket-table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTax {
    /// Portion of the taxable amount falling into this bracket. Never
    /// negative.
    pub applicable_amount: Decimal,

    /// `applicable_amount * rate`. Never negative.
    pub tax_amount: Decimal,
}

/// The complete outcome of one calculation: input echo, the bracket table
/// used, the deduction audit trail, per-bracket tax, and the totals.
///
/// Fully derived and immutable; every input change recomputes a fresh
/// result from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub tax_year: i32,
    pub income: Decimal,
    pub expenses: Decimal,

    /// The year's brackets, echoed for renderers.
    pub brackets: Vec<TaxBracket>,

    /// Deduction audit trail, in application order, ending with the
    /// "Total Deduction" and "Total Taxables" summary lines.
    pub deductions: Vec<DeductionLine>,

    /// Income remaining after all deductions, before bracket tax.
    pub taxable_amount: Decimal,

    /// One entry per bracket, same order as `brackets`.
    pub bracket_taxes: Vec<BracketTax>,

    pub total_tax: Decimal,

    /// Mandatory contribution deducted from net income. Zero when the
    /// contribution policy is disabled, the tier is 0, or the under-29
    /// exemption applies.
    pub contribution_amount: Decimal,

    /// `income - total_tax - contribution_amount`.
    pub net_income: Decimal,

    /// `total_tax / income`, or `None` when income is zero. Formatters must
    /// render the `None` case as a sentinel, not a number.
    pub effective_tax_rate: Option<Decimal>,
}

impl CalculationResult {
    pub fn monthly_net_income(&self) -> Decimal {
        self.net_income / Decimal::from(12)
    }
}
