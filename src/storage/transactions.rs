//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Transaction, TransactionId, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn read_guard(
        &self,
    ) -> LedgerResult<RwLockReadGuard<'_, HashMap<TransactionId, Transaction>>> {
        self.data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    /// Load transactions from disk
    pub fn load(&self) -> LedgerResult<()> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        let mut skipped = 0usize;
        for txn in file_data.transactions {
            if let Err(e) = txn.validate() {
                tracing::warn!(id = %txn.id, error = %e, "skipping invalid transaction");
                skipped += 1;
                continue;
            }
            data.insert(txn.id, txn);
        }

        tracing::debug!(count = data.len(), skipped, "loaded transactions");
        Ok(())
    }

    /// Save transactions to disk, newest first
    pub fn save(&self) -> LedgerResult<()> {
        let data = self.read_guard()?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        Ok(self.read_guard()?.get(&id).cloned())
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> LedgerResult<Vec<Transaction>> {
        let data = self.read_guard()?;
        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));
        Ok(transactions)
    }

    /// Get one user's transactions, newest first
    pub fn get_by_user(&self, user_id: UserId) -> LedgerResult<Vec<Transaction>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|t| t.user_id == user_id)
            .collect())
    }

    /// Insert or replace a transaction
    pub fn upsert(&self, txn: Transaction) -> LedgerResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction, returning whether it existed
    pub fn delete(&self, id: TransactionId) -> LedgerResult<bool> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(data.remove(&id).is_some())
    }

    pub fn count(&self) -> LedgerResult<usize> {
        Ok(self.read_guard()?.len())
    }
}
