use std::collections::BTreeMap;
use std::io::Read;

use gelir_core::{BracketTable, BracketTableError, TaxBracket, TaxTableSet};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading bracket table data.
#[derive(Debug, Error)]
pub enum TaxTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("invalid bracket table: {0}")]
    InvalidTable(#[from] BracketTableError),

    #[error("no bracket records found")]
    NoRecords,
}

impl From<csv::Error> for TaxTableLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a bracket table CSV file.
///
/// Columns:
/// - `tax_year`: the year this bracket belongs to
/// - `min_income`: lower bound of the bracket
/// - `max_income`: upper bound (empty for the unbounded final bracket)
/// - `rate`: marginal rate as a decimal (e.g., 0.15 for 15%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: i32,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader turning bracket table CSV data into a [`TaxTableSet`].
///
/// Records are grouped by year, sorted by `min_income`, and each year's
/// list goes through the validating [`BracketTable`] constructor, so a
/// loaded set always satisfies the bracket invariants.
pub struct TaxTableLoader;

impl TaxTableLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, TaxTableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build a validated table set from parsed records.
    ///
    /// # Errors
    ///
    /// Returns [`TaxTableLoaderError::NoRecords`] for an empty record list
    /// and [`TaxTableLoaderError::InvalidTable`] when a year's brackets do
    /// not partition `[0, ∞)`.
    pub fn build(records: &[BracketRecord]) -> Result<TaxTableSet, TaxTableLoaderError> {
        if records.is_empty() {
            return Err(TaxTableLoaderError::NoRecords);
        }

        let mut by_year: BTreeMap<i32, Vec<TaxBracket>> = BTreeMap::new();
        for record in records {
            by_year.entry(record.tax_year).or_default().push(TaxBracket {
                min_income: record.min_income,
                max_income: record.max_income,
                rate: record.rate,
            });
        }

        let mut set = TaxTableSet::new();
        for (year, mut brackets) in by_year {
            brackets.sort_by_key(|b| b.min_income);
            set.insert(BracketTable::new(year, brackets)?);
        }

        Ok(set)
    }

    /// Parse and build in one step.
    pub fn load<R: Read>(reader: R) -> Result<TaxTableSet, TaxTableLoaderError> {
        let records = Self::parse(reader)?;
        Self::build(&records)
    }
}
