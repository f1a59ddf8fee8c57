//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryId, TransactionType};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    pub categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn read_guard(
        &self,
    ) -> LedgerResult<RwLockReadGuard<'_, HashMap<CategoryId, Category>>> {
        self.categories
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    /// Load categories from disk
    pub fn load(&self) -> LedgerResult<()> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = self
            .categories
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        tracing::debug!(count = categories.len(), "loaded categories");
        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> LedgerResult<()> {
        let categories = self.get_all()?;
        write_json_atomic(&self.path, &CategoryData { categories })
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> LedgerResult<Option<Category>> {
        Ok(self.read_guard()?.get(&id).cloned())
    }

    /// All categories, income first, then by name
    pub fn get_all(&self) -> LedgerResult<Vec<Category>> {
        let categories = self.read_guard()?;
        let mut list: Vec<_> = categories.values().cloned().collect();
        list.sort_by(|a, b| {
            a.category_type
                .cmp(&b.category_type)
                .then_with(|| a.name.cmp(&b.name))
                .then(a.id.cmp(&b.id))
        });
        Ok(list)
    }

    /// Categories valid for one transaction type
    pub fn get_by_type(&self, category_type: TransactionType) -> LedgerResult<Vec<Category>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|c| c.category_type == category_type)
            .collect())
    }

    /// Find a category by case-insensitive name
    pub fn find_by_name(&self, name: &str) -> LedgerResult<Option<Category>> {
        let needle = name.trim().to_lowercase();
        Ok(self
            .get_all()?
            .into_iter()
            .find(|c| c.name.to_lowercase() == needle))
    }

    /// Insert or replace a category
    pub fn upsert(&self, category: Category) -> LedgerResult<()> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        categories.insert(category.id, category);
        Ok(())
    }

    /// Delete a category, returning whether it existed
    pub fn delete(&self, id: CategoryId) -> LedgerResult<bool> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(categories.remove(&id).is_some())
    }

    pub fn is_empty(&self) -> LedgerResult<bool> {
        Ok(self.read_guard()?.is_empty())
    }
}
