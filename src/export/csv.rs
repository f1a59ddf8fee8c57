//! CSV Export functionality
//!
//! Serializes transactions in the order given, one row each. Writing to a
//! `String` is pure; [`write_transactions_csv`] adds an `io::Write` sink.

use std::borrow::Cow;
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryIndex, Transaction};

/// Header row of every transaction export
pub const CSV_HEADER: &str = "date,type,category,description,amount";

/// Render `transactions` as CSV text (header plus one line per row)
pub fn transactions_to_csv<'a, I>(transactions: I, categories: &CategoryIndex<'_>) -> String
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut output = String::from(CSV_HEADER);
    output.push('\n');

    for txn in transactions {
        output.push_str(&txn.date.format("%Y-%m-%d").to_string());
        output.push(',');
        output.push_str(txn.txn_type.as_str());
        output.push(',');
        output.push_str(&escape_csv(categories.name_for(txn.category_id)));
        output.push(',');
        output.push_str(&escape_csv(&txn.description));
        output.push(',');
        output.push_str(&txn.amount.to_decimal_string());
        output.push('\n');
    }

    output
}

/// Write `transactions` as CSV to `writer`
pub fn write_transactions_csv<'a, W, I>(
    writer: &mut W,
    transactions: I,
    categories: &CategoryIndex<'_>,
) -> LedgerResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Transaction>,
{
    let csv = transactions_to_csv(transactions, categories);
    writer
        .write_all(csv.as_bytes())
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writer.flush().map_err(|e| LedgerError::Export(e.to_string()))
}

/// Quote a field containing a comma, quote or line break; double inner quotes
fn escape_csv(s: &str) -> Cow<'_, str> {
    if s.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(s)
    }
}
