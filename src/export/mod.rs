//! Export module for ledger-lens
//!
//! - CSV: filtered transaction lists (spreadsheet-compatible)
//! - JSON / YAML: report records and full ledger exports

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{transactions_to_csv, write_transactions_csv, CSV_HEADER};
pub use json::{export_ledger_json, write_json, LedgerExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_ledger_yaml, write_yaml};
