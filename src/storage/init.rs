//! Storage initialization
//!
//! Handles first-run setup: seeding the default category set and, on
//! request, a handful of sample transactions.

use chrono::{Days, NaiveDate};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{default_categories, Money, Transaction, TransactionType, UserId};

use super::Storage;

/// Sample entries: (days before today, category, cents, type, description)
const SAMPLE_TRANSACTIONS: &[(u64, &str, i64, TransactionType, &str)] = &[
    (0, "Salary", 300000, TransactionType::Income, "Monthly Salary"),
    (1, "Food & Dining", 4550, TransactionType::Expense, "Grocery shopping at Whole Foods"),
    (2, "Transportation", 2500, TransactionType::Expense, "Gas station fill-up"),
    (3, "Housing", 120000, TransactionType::Expense, "Monthly rent payment"),
    (4, "Healthcare", 7500, TransactionType::Expense, "Doctor visit copay"),
    (5, "Entertainment", 3500, TransactionType::Expense, "Movie night with friends"),
    (6, "Freelance", 50000, TransactionType::Income, "Freelance web design project"),
    (7, "Shopping", 12000, TransactionType::Expense, "Online shopping - clothes"),
    (8, "Food & Dining", 2875, TransactionType::Expense, "Coffee shop and lunch"),
    (9, "Fitness", 8500, TransactionType::Expense, "Gym membership renewal"),
];

/// Seed the default categories into an empty store.
///
/// Returns the number of categories created (zero when some already exist).
pub fn initialize_storage(storage: &Storage) -> LedgerResult<usize> {
    storage.paths().ensure_directories()?;

    if !storage.categories.is_empty()? {
        return Ok(0);
    }

    let defaults = default_categories();
    let count = defaults.len();
    for category in defaults {
        storage.categories.upsert(category)?;
    }
    storage.categories.save()?;

    tracing::info!(count, "seeded default categories");
    Ok(count)
}

/// Insert ten sample transactions for `user_id`, dated over the ten days
/// ending on `today`
pub fn add_sample_data(
    storage: &Storage,
    user_id: UserId,
    today: NaiveDate,
) -> LedgerResult<Vec<Transaction>> {
    let mut added = Vec::with_capacity(SAMPLE_TRANSACTIONS.len());

    for (days_ago, category_name, cents, txn_type, description) in SAMPLE_TRANSACTIONS {
        let category = storage
            .categories
            .find_by_name(category_name)?
            .ok_or_else(|| LedgerError::category_not_found(*category_name))?;
        let date = today.checked_sub_days(Days::new(*days_ago)).ok_or_else(|| {
            LedgerError::Validation(format!("Cannot date a sample {} days before {}", days_ago, today))
        })?;

        let txn = Transaction::with_details(
            user_id,
            *txn_type,
            Money::from_cents(*cents),
            date,
            Some(category.id),
            *description,
        );
        storage.transactions.upsert(txn.clone())?;
        added.push(txn);
    }

    storage.transactions.save()?;
    tracing::info!(count = added.len(), user = %user_id, "added sample transactions");
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use tempfile::TempDir;

    fn storage(temp_dir: &TempDir) -> Storage {
        Storage::new(LedgerPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap()
    }

    #[test]
    fn test_initialize_seeds_once() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);

        assert_eq!(initialize_storage(&storage).unwrap(), 23);
        assert_eq!(initialize_storage(&storage).unwrap(), 0);
        assert!(storage.paths().categories_file().exists());
    }

    #[test]
    fn test_sample_data_dated_relative_to_today() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);
        initialize_storage(&storage).unwrap();

        let today = NaiveDate::from_ymd_opt(2025, 9, 25).unwrap();
        let user = UserId::new();
        let added = add_sample_data(&storage, user, today).unwrap();

        assert_eq!(added.len(), 10);
        assert_eq!(added[0].date, today);
        assert_eq!(added[9].date, NaiveDate::from_ymd_opt(2025, 9, 16).unwrap());
        assert!(added.iter().all(|t| t.category_id.is_some()));
        assert_eq!(storage.transactions.get_by_user(user).unwrap().len(), 10);
    }

    #[test]
    fn test_sample_data_needs_categories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir);

        let err = add_sample_data(
            &storage,
            UserId::new(),
            NaiveDate::from_ymd_opt(2025, 9, 25).unwrap(),
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
