//! Budget service
//!
//! Setting, replacing and removing per-category spending limits.

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, BudgetId, BudgetPeriod, CategoryId, Money, TransactionType, UserId};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Input for setting a budget
#[derive(Debug, Clone)]
pub struct SetBudgetInput {
    pub user_id: UserId,
    pub category_id: CategoryId,
    pub amount: Money,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a budget, or replace the user's existing one for the same
    /// category and period
    pub fn set(&self, input: SetBudgetInput) -> LedgerResult<Budget> {
        let category = self
            .storage
            .categories
            .get(input.category_id)?
            .ok_or_else(|| LedgerError::category_not_found(input.category_id.to_string()))?;

        if category.category_type != TransactionType::Expense {
            return Err(LedgerError::Validation(format!(
                "Budgets apply to expense categories; '{}' is an income category",
                category.name
            )));
        }

        let budget = match self
            .storage
            .budgets
            .find(input.user_id, input.category_id, input.period)?
        {
            Some(mut existing) => {
                existing.set_amount(input.amount);
                existing.start_date = input.start_date;
                existing.active = true;
                existing
            }
            None => Budget::new(
                input.user_id,
                input.category_id,
                input.amount,
                input.period,
                input.start_date,
            ),
        };
        budget.validate()?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        tracing::info!(
            id = %budget.id,
            category = %category.name,
            period = %budget.period,
            amount = %budget.amount,
            "set budget"
        );
        Ok(budget)
    }

    /// Remove one of the user's budgets
    pub fn remove(&self, user_id: UserId, id: BudgetId) -> LedgerResult<Budget> {
        let budget = self
            .storage
            .budgets
            .get(id)?
            .filter(|b| b.user_id == user_id)
            .ok_or_else(|| LedgerError::budget_not_found(id.to_string()))?;

        self.storage.budgets.delete(id)?;
        self.storage.budgets.save()?;

        tracing::info!(id = %id, "removed budget");
        Ok(budget)
    }

    /// Find one of the user's budgets by full or short ID
    pub fn find(&self, user_id: UserId, id: &str) -> LedgerResult<Budget> {
        let needle = id.trim();
        let short = needle.strip_prefix("bud-").unwrap_or(needle);

        if let Ok(parsed) = needle.parse::<BudgetId>() {
            if let Some(budget) = self.storage.budgets.get(parsed)? {
                if budget.user_id == user_id {
                    return Ok(budget);
                }
            }
        }

        let mut matches = self
            .list(user_id)?
            .into_iter()
            .filter(|b| !short.is_empty() && b.id.as_uuid().to_string().starts_with(short));

        match (matches.next(), matches.next()) {
            (Some(budget), None) => Ok(budget),
            (Some(_), Some(_)) => Err(LedgerError::Validation(format!(
                "Budget ID '{}' is ambiguous",
                needle
            ))),
            _ => Err(LedgerError::budget_not_found(needle)),
        }
    }

    pub fn list(&self, user_id: UserId) -> LedgerResult<Vec<Budget>> {
        self.storage.budgets.get_by_user(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::storage::initialize_storage;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        initialize_storage(&storage).unwrap();
        (temp_dir, storage)
    }

    fn input(storage: &Storage, user: UserId, category: &str, cents: i64) -> SetBudgetInput {
        SetBudgetInput {
            user_id: user,
            category_id: storage.categories.find_by_name(category).unwrap().unwrap().id,
            amount: Money::from_cents(cents),
            period: BudgetPeriod::Monthly,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_set_replaces_same_category_and_period() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let user = UserId::new();

        let first = service.set(input(&storage, user, "Food & Dining", 20000)).unwrap();
        let second = service.set(input(&storage, user, "Food & Dining", 35000)).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(service.list(user).unwrap().len(), 1);
        assert_eq!(service.list(user).unwrap()[0].amount, Money::from_cents(35000));

        let mut weekly = input(&storage, user, "Food & Dining", 5000);
        weekly.period = BudgetPeriod::Weekly;
        service.set(weekly).unwrap();
        assert_eq!(service.list(user).unwrap().len(), 2);
    }

    #[test]
    fn test_set_validation() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let user = UserId::new();

        assert!(service
            .set(input(&storage, user, "Salary", 1000))
            .unwrap_err()
            .is_validation());
        assert!(service
            .set(input(&storage, user, "Housing", 0))
            .unwrap_err()
            .is_validation());

        let mut unknown = input(&storage, user, "Housing", 1000);
        unknown.category_id = CategoryId::new();
        assert!(service.set(unknown).unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove_and_find_are_owner_scoped() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let alice = UserId::new();
        let budget = service.set(input(&storage, alice, "Travel", 50000)).unwrap();

        let short = budget.id.to_string();
        assert_eq!(service.find(alice, &short).unwrap().id, budget.id);
        assert!(service.find(UserId::new(), &short).unwrap_err().is_not_found());

        assert!(service.remove(UserId::new(), budget.id).unwrap_err().is_not_found());
        service.remove(alice, budget.id).unwrap();
        assert!(service.list(alice).unwrap().is_empty());
    }
}
