//! Storage layer for ledger-lens
//!
//! JSON file storage with atomic writes. Reports never read the repositories
//! directly; they receive a [`LedgerSnapshot`] taken under all read locks.

pub mod budgets;
pub mod categories;
pub mod file_io;
pub mod init;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{add_sample_data, initialize_storage};
pub use transactions::TransactionRepository;

use crate::config::paths::LedgerPaths;
use crate::error::LedgerResult;
use crate::models::{LedgerSnapshot, UserId};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    pub budgets: BudgetRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LedgerPaths) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            paths,
        })
    }

    /// Create and load in one step
    pub fn open(paths: LedgerPaths) -> LedgerResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> LedgerResult<()> {
        self.transactions.load()?;
        self.categories.load()?;
        self.budgets.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> LedgerResult<()> {
        self.transactions.save()?;
        self.categories.save()?;
        self.budgets.save()?;
        Ok(())
    }

    /// One user's transactions and budgets plus every category, read while
    /// all three read locks are held
    pub fn snapshot(&self, user_id: UserId) -> LedgerResult<LedgerSnapshot> {
        let transactions = self.transactions.read_guard()?;
        let categories = self.categories.read_guard()?;
        let budgets = self.budgets.read_guard()?;

        let mut snapshot = LedgerSnapshot {
            user_id,
            transactions: transactions
                .values()
                .filter(|t| t.user_id == user_id)
                .cloned()
                .collect(),
            categories: categories.values().cloned().collect(),
            budgets: budgets
                .values()
                .filter(|b| b.user_id == user_id)
                .cloned()
                .collect(),
        };

        // HashMap order is arbitrary; keep snapshots deterministic
        snapshot
            .transactions
            .sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        snapshot.categories.sort_by(|a, b| a.id.cmp(&b.id));
        snapshot.budgets.sort_by(|a, b| a.id.cmp(&b.id));

        tracing::debug!(
            user = %user_id,
            transactions = snapshot.transactions.len(),
            budgets = snapshot.budgets.len(),
            "took ledger snapshot"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, BudgetPeriod, Category, Money, Transaction, TransactionType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let _storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
    }

    #[test]
    fn test_snapshot_is_scoped_to_user() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::new(LedgerPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let alice = UserId::new();
        let bob = UserId::new();

        let food = Category::new("Food", TransactionType::Expense);
        storage.categories.upsert(food.clone()).unwrap();
        for user in [alice, bob] {
            storage
                .transactions
                .upsert(Transaction::new(
                    user,
                    TransactionType::Expense,
                    Money::from_cents(500),
                    date,
                ))
                .unwrap();
        }
        storage
            .budgets
            .upsert(Budget::new(
                bob,
                food.id,
                Money::from_cents(10000),
                BudgetPeriod::Monthly,
                date,
            ))
            .unwrap();

        let snapshot = storage.snapshot(alice).unwrap();
        assert_eq!(snapshot.user_id, alice);
        assert_eq!(snapshot.transactions.len(), 1);
        assert!(snapshot.transactions.iter().all(|t| t.user_id == alice));
        assert_eq!(snapshot.categories.len(), 1);
        assert!(snapshot.budgets.is_empty());
    }

    #[test]
    fn test_save_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        storage
            .categories
            .upsert(Category::new("Salary", TransactionType::Income))
            .unwrap();
        storage.save_all().unwrap();

        let reopened = Storage::open(paths).unwrap();
        assert_eq!(reopened.categories.get_all().unwrap().len(), 1);
    }
}
