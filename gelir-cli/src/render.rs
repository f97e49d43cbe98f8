//! Renders a [`CalculationResult`] into the two result tables and the
//! totals footer. Pure string building; all business logic stays in the
//! engine.

use gelir_core::format::{
    DEFAULT_CURRENCY, SENTINEL, format_amount, format_amount_or_dash, format_opt_rate,
};
use gelir_core::{BracketTable, CalculationResult};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

#[derive(Debug, Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Item")]
    item: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Debug, Tabled)]
struct BracketRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Taxable")]
    taxable: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

/// The deduction audit trail as a table, in application order.
pub fn input_breakdown(result: &CalculationResult) -> String {
    let rows: Vec<BreakdownRow> = result
        .deductions
        .iter()
        .map(|line| BreakdownRow {
            item: line.kind.label(),
            amount: format_amount(line.amount, DEFAULT_CURRENCY),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string()
}

/// The per-bracket results table: the table's precomputed labels plus the
/// computed amounts, with the sentinel for non-positive amounts.
pub fn bracket_results(table: &BracketTable, result: &CalculationResult) -> String {
    let rows: Vec<BracketRow> = table
        .labels()
        .iter()
        .zip(&result.bracket_taxes)
        .map(|(labels, bracket_tax)| BracketRow {
            from: labels.min.clone(),
            to: labels.max.clone(),
            rate: labels.rate.clone(),
            taxable: format_amount_or_dash(bracket_tax.applicable_amount, DEFAULT_CURRENCY),
            tax: format_amount_or_dash(bracket_tax.tax_amount, DEFAULT_CURRENCY),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string()
}

/// The totals footer. `show_contribution` controls whether the
/// mandatory-contribution line appears at all (the deployment variant
/// without that policy omits it).
pub fn totals(result: &CalculationResult, show_contribution: bool) -> String {
    let effective = format_opt_rate(result.effective_tax_rate);

    let mut lines = vec![
        (
            "Total Income",
            format_amount(result.income, DEFAULT_CURRENCY),
        ),
        (
            "Total Tax",
            format!(
                "{} (~{} effective)",
                format_amount(-result.total_tax, DEFAULT_CURRENCY),
                effective
            ),
        ),
    ];

    if show_contribution {
        let amount = if result.contribution_amount > rust_decimal::Decimal::ZERO {
            format_amount(-result.contribution_amount, DEFAULT_CURRENCY)
        } else {
            SENTINEL.to_string()
        };
        lines.push(("Mandatory Contribution", amount));
    }

    lines.push((
        "Net Income",
        format_amount(result.net_income, DEFAULT_CURRENCY),
    ));
    lines.push((
        "Monthly Net Income",
        format_amount(result.monthly_net_income(), DEFAULT_CURRENCY),
    ));

    lines
        .into_iter()
        .map(|(label, value)| format!("{label:<24}{value}\n"))
        .collect()
}
