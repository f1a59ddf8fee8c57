//! Budget repository for JSON storage
//!
//! Manages loading and saving budgets to budgets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, BudgetId, BudgetPeriod, CategoryId, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn read_guard(&self) -> LedgerResult<RwLockReadGuard<'_, HashMap<BudgetId, Budget>>> {
        self.budgets
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    /// Load budgets from disk
    pub fn load(&self) -> LedgerResult<()> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.clear();
        let mut skipped = 0usize;
        for budget in file_data.budgets {
            if let Err(e) = budget.validate() {
                tracing::warn!(id = %budget.id, error = %e, "skipping invalid budget");
                skipped += 1;
                continue;
            }
            budgets.insert(budget.id, budget);
        }

        tracing::debug!(count = budgets.len(), skipped, "loaded budgets");
        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> LedgerResult<()> {
        let budgets = self.get_all()?;
        write_json_atomic(&self.path, &BudgetData { budgets })
    }

    pub fn get(&self, id: BudgetId) -> LedgerResult<Option<Budget>> {
        Ok(self.read_guard()?.get(&id).cloned())
    }

    /// All budgets ordered by creation time
    pub fn get_all(&self) -> LedgerResult<Vec<Budget>> {
        let budgets = self.read_guard()?;
        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(list)
    }

    pub fn get_by_user(&self, user_id: UserId) -> LedgerResult<Vec<Budget>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|b| b.user_id == user_id)
            .collect())
    }

    /// The budget a user already has for a category and period, if any
    pub fn find(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        period: BudgetPeriod,
    ) -> LedgerResult<Option<Budget>> {
        Ok(self.read_guard()?.values().find(|b| {
            b.user_id == user_id && b.category_id == category_id && b.period == period
        }).cloned())
    }

    /// Insert or replace a budget
    pub fn upsert(&self, budget: Budget) -> LedgerResult<()> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        budgets.insert(budget.id, budget);
        Ok(())
    }

    /// Delete a budget, returning whether it existed
    pub fn delete(&self, id: BudgetId) -> LedgerResult<bool> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(budgets.remove(&id).is_some())
    }
}
