//! JSON output
//!
//! Machine-readable report records and a full ledger export with schema
//! versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, Category, LedgerSnapshot, Transaction, UserId};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Everything one user owns, plus the categories it references
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Version of ledger-lens that wrote the export
    pub app_version: String,

    pub user_id: UserId,
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub budgets: Vec<Budget>,

    /// Date of the earliest transaction
    pub earliest_transaction: Option<String>,

    /// Date of the latest transaction
    pub latest_transaction: Option<String>,
}

impl LedgerExport {
    /// Build an export from a snapshot
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        let earliest_transaction = snapshot
            .transactions
            .iter()
            .map(|t| t.date)
            .min()
            .map(|d| d.to_string());
        let latest_transaction = snapshot
            .transactions
            .iter()
            .map(|t| t.date)
            .max()
            .map(|d| d.to_string());

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user_id: snapshot.user_id,
            transactions: snapshot.transactions,
            categories: snapshot.categories,
            budgets: snapshot.budgets,
            earliest_transaction,
            latest_transaction,
        }
    }
}

/// Serialize any record as JSON
pub fn write_json<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
    pretty: bool,
) -> LedgerResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)
    } else {
        serde_json::to_writer(&mut *writer, value)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))
}

/// Export a user's ledger as JSON
pub fn export_ledger_json<W: Write>(
    snapshot: LedgerSnapshot,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    write_json(writer, &LedgerExport::from_snapshot(snapshot), pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use chrono::NaiveDate;

    #[test]
    fn test_export_ledger_json() {
        let user = UserId::new();
        let snapshot = LedgerSnapshot {
            user_id: user,
            transactions: vec![
                Transaction::new(
                    user,
                    TransactionType::Income,
                    Money::from_cents(1000),
                    NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                ),
                Transaction::new(
                    user,
                    TransactionType::Expense,
                    Money::from_cents(500),
                    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
                ),
            ],
            ..Default::default()
        };

        let mut buffer = Vec::new();
        export_ledger_json(snapshot, &mut buffer, true).unwrap();

        let parsed: LedgerExport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed.user_id, user);
        assert_eq!(parsed.transactions.len(), 2);
        assert_eq!(parsed.earliest_transaction.as_deref(), Some("2024-01-05"));
        assert_eq!(parsed.latest_transaction.as_deref(), Some("2024-03-09"));
    }

    #[test]
    fn test_write_json_compact() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &vec![1, 2, 3], false).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "[1,2,3]\n");
    }
}
