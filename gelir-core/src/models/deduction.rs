use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of a deduction-trail line, in the order the engine records them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeductionKind {
    BaseIncome,
    Expenses,
    ExportExemption,
    Under29Exemption,
    TotalDeduction,
    TotalTaxable,
}

impl DeductionKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::BaseIncome => "Base Taxables (Income)",
            Self::Expenses => "Deduction (Expenses)",
            Self::ExportExemption => "Deduction (Software Exporter)",
            Self::Under29Exemption => "Deduction (Aged Under 29)",
            Self::TotalDeduction => "Total Deduction",
            Self::TotalTaxable => "Total Taxables",
        }
    }
}

/// One line of the deduction audit trail. Deductions carry negative
/// amounts; the base and summary lines carry the running totals. The line
/// order is the record of how gross income became taxable income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    pub kind: DeductionKind,
    pub amount: Decimal,
}

impl DeductionLine {
    pub fn new(kind: DeductionKind, amount: Decimal) -> Self {
        Self { kind, amount }
    }
}
