//! Point-in-time view of one user's ledger
//!
//! Every report is computed from a snapshot read in a single step from the
//! store, so budgets and transactions always describe the same moment.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::budget::Budget;
use super::category::{Category, UNCATEGORIZED_LABEL};
use super::ids::{CategoryId, UserId};
use super::transaction::Transaction;

/// All records needed for one computation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub user_id: UserId,
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub budgets: Vec<Budget>,
}

impl LedgerSnapshot {
    /// Build a category index over this snapshot
    pub fn category_index(&self) -> CategoryIndex<'_> {
        CategoryIndex::new(&self.categories)
    }
}

/// Lookup from category ID to category, folding dangling references into
/// "Uncategorized"
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex<'a> {
    by_id: HashMap<CategoryId, &'a Category>,
}

impl<'a> CategoryIndex<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        Self {
            by_id: categories.iter().map(|c| (c.id, c)).collect(),
        }
    }

    /// The category a reference points at, if it exists
    pub fn resolve(&self, category_id: Option<CategoryId>) -> Option<&'a Category> {
        category_id.and_then(|id| self.by_id.get(&id).copied())
    }

    /// The reference with dangling IDs replaced by `None`
    pub fn effective_id(&self, category_id: Option<CategoryId>) -> Option<CategoryId> {
        self.resolve(category_id).map(|c| c.id)
    }

    /// Display name, "Uncategorized" for missing or dangling references
    pub fn name_for(&self, category_id: Option<CategoryId>) -> &'a str {
        self.resolve(category_id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNCATEGORIZED_LABEL)
    }

    /// Find a category by case-insensitive name
    pub fn find_by_name(&self, name: &str) -> Option<&'a Category> {
        let needle = name.trim().to_lowercase();
        self.by_id
            .values()
            .copied()
            .find(|c| c.name.to_lowercase() == needle)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;

    #[test]
    fn test_dangling_reference_reads_as_uncategorized() {
        let food = Category::new("Food", TransactionType::Expense);
        let categories = vec![food.clone()];
        let index = CategoryIndex::new(&categories);

        assert_eq!(index.name_for(Some(food.id)), "Food");
        assert_eq!(index.name_for(None), UNCATEGORIZED_LABEL);

        let missing = CategoryId::new();
        assert_eq!(index.name_for(Some(missing)), UNCATEGORIZED_LABEL);
        assert_eq!(index.effective_id(Some(missing)), None);
        assert_eq!(index.effective_id(Some(food.id)), Some(food.id));
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        let categories = vec![Category::new("Food & Dining", TransactionType::Expense)];
        let index = CategoryIndex::new(&categories);
        assert!(index.find_by_name("food & dining").is_some());
        assert!(index.find_by_name("Travel").is_none());
        assert_eq!(index.len(), 1);
    }
}
