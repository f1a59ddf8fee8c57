//! Category service
//!
//! Lookup and creation of categories. Transactions and budgets refer to
//! categories by ID or, on the command line, by name.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryId, TransactionType};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// List categories, optionally only those of one type
    pub fn list(&self, category_type: Option<TransactionType>) -> LedgerResult<Vec<Category>> {
        match category_type {
            Some(t) => self.storage.categories.get_by_type(t),
            None => self.storage.categories.get_all(),
        }
    }

    pub fn get(&self, id: CategoryId) -> LedgerResult<Category> {
        self.storage
            .categories
            .get(id)?
            .ok_or_else(|| LedgerError::category_not_found(id.to_string()))
    }

    /// Find a category by ID or case-insensitive name
    pub fn find(&self, name_or_id: &str) -> LedgerResult<Category> {
        let needle = name_or_id.trim();

        if let Ok(id) = needle.parse::<CategoryId>() {
            if let Some(category) = self.storage.categories.get(id)? {
                return Ok(category);
            }
        }

        self.storage
            .categories
            .find_by_name(needle)?
            .ok_or_else(|| LedgerError::category_not_found(needle))
    }

    /// Create a custom category
    pub fn create(
        &self,
        name: &str,
        category_type: TransactionType,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> LedgerResult<Category> {
        let name = name.trim();

        if self.storage.categories.find_by_name(name)?.is_some() {
            return Err(LedgerError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let mut category = Category::new(name, category_type);
        if let Some(icon) = icon {
            category.icon = icon.to_string();
        }
        if let Some(color) = color {
            category.color = color.to_string();
        }
        category.validate()?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        tracing::info!(category = %category.name, kind = %category_type, "created category");
        Ok(category)
    }
}
