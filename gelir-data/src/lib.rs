//! Bracket table data for the income tax calculator: built-in year tables
//! and a CSV loader for deployment-specific tables.

mod embedded;
mod loader;

pub use embedded::builtin_tables;
pub use loader::{BracketRecord, TaxTableLoader, TaxTableLoaderError};
