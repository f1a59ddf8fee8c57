//! YAML output
//!
//! Human-readable report records and ledger export.

use serde::Serialize;
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::LedgerExport;
use crate::models::LedgerSnapshot;

/// Serialize any record as YAML
pub fn write_yaml<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> LedgerResult<()> {
    serde_yaml::to_writer(writer, value).map_err(|e| LedgerError::Export(e.to_string()))
}

/// Export a user's ledger as YAML with a short comment header
pub fn export_ledger_yaml<W: Write>(snapshot: LedgerSnapshot, writer: &mut W) -> LedgerResult<()> {
    let export = LedgerExport::from_snapshot(snapshot);

    let header = [
        "# ledger-lens export".to_string(),
        format!("# Generated: {}", export.exported_at),
        format!("# App Version: {}", export.app_version),
    ];
    for line in header {
        writeln!(writer, "{}", line).map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    write_yaml(writer, &export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;

    #[test]
    fn test_export_ledger_yaml() {
        let user = UserId::new();
        let snapshot = LedgerSnapshot {
            user_id: user,
            ..Default::default()
        };

        let mut buffer = Vec::new();
        export_ledger_yaml(snapshot, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("# ledger-lens export"));
        let parsed: LedgerExport = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed.user_id, user);
        assert!(parsed.transactions.is_empty());
    }
}
