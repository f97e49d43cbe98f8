use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use gelir_core::CalculationInput;
use gelir_core::calculations::{Calculator, CalculatorPolicy, ContributionPolicy};
use gelir_data::{TaxTableLoader, builtin_tables};
use rust_decimal::Decimal;

mod logging;
mod render;
mod utils;

/// Progressive income tax calculator for freelancer income.
///
/// Computes bracket-by-bracket tax, total tax, effective rate, and net
/// income for a tax year, after expense and exemption deductions.
#[derive(Parser, Debug)]
#[command(name = "gelir")]
#[command(version, about, long_about = None)]
struct Args {
    /// Gross income. Accepts grouped digits ("100.000").
    #[arg(value_parser = utils::parse_amount)]
    income: Decimal,

    /// Tax year. Defaults to the latest configured year.
    #[arg(short, long)]
    year: Option<i32>,

    /// Deductible expenses.
    #[arg(short, long, value_parser = utils::parse_amount, default_value = "0")]
    expenses: Decimal,

    /// Apply the 50% software-export exemption.
    #[arg(long)]
    export_exempt: bool,

    /// Apply the under-29 exemption (also waives the mandatory
    /// contribution).
    #[arg(long = "under-29")]
    under29: bool,

    /// Mandatory-contribution tier; 0 selects no contribution.
    #[arg(short, long, default_value_t = 0)]
    contribution_tier: u32,

    /// Load bracket tables from a CSV file instead of the built-in ones.
    ///
    /// Columns: tax_year,min_income,max_income,rate (empty max_income
    /// means unbounded).
    #[arg(short, long)]
    brackets: Option<PathBuf>,

    /// Output the result as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let tables = match &args.brackets {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open: {}", path.display()))?;
            TaxTableLoader::load(file).with_context(|| {
                format!("failed to load bracket tables from: {}", path.display())
            })?
        }
        None => builtin_tables(),
    };

    let Some(tax_year) = args.year.or_else(|| tables.latest_year()) else {
        bail!("no bracket tables configured");
    };

    let calculator = Calculator::new(
        tables,
        CalculatorPolicy {
            contribution: Some(ContributionPolicy::default()),
            ..CalculatorPolicy::default()
        },
    );

    let input = CalculationInput {
        tax_year,
        income: args.income,
        expenses: args.expenses,
        exempt_export_software: args.export_exempt,
        exempt_under29: args.under29,
        contribution_tier: args.contribution_tier,
    };

    tracing::debug!(?input, "running calculation");

    let result = calculator.calculate(&input).with_context(|| {
        let years: Vec<String> = calculator.tables().years().map(|y| y.to_string()).collect();
        format!("calculation failed (configured years: {})", years.join(", "))
    })?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("failed to serialize result")?
        );
        return Ok(());
    }

    // calculate() already resolved the year, so the table is present.
    let table = calculator
        .table(tax_year)
        .with_context(|| format!("no bracket table for tax year {tax_year}"))?;

    println!();
    println!("INPUT BREAKDOWN");
    println!("{}", render::input_breakdown(&result));
    println!("BRACKETS ({tax_year})");
    println!("{}", render::bracket_results(table, &result));
    println!("{}", render::totals(&result, true));

    Ok(())
}
