//! Category model
//!
//! A category is valid for exactly one transaction type. Transactions and
//! budgets reference categories but never own them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::transaction::TransactionType;

/// Display name used for transactions without a (resolvable) category
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// A transaction category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Which kind of transaction may use this category
    #[serde(rename = "type")]
    pub category_type: TransactionType,

    /// Icon shown next to the name
    #[serde(default = "default_icon")]
    pub icon: String,

    /// Display colour as `#RRGGBB`
    #[serde(default = "default_color")]
    pub color: String,

    /// Whether this category was seeded at initialization
    #[serde(default)]
    pub is_default: bool,
}

fn default_icon() -> String {
    "💳".to_string()
}

fn default_color() -> String {
    "#4F8A8B".to_string()
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>, category_type: TransactionType) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            category_type,
            icon: default_icon(),
            color: default_color(),
            is_default: false,
        }
    }

    /// Create a category with icon and colour
    pub fn styled(
        name: impl Into<String>,
        category_type: TransactionType,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        let mut category = Self::new(name, category_type);
        category.icon = icon.into();
        category.color = color.into();
        category
    }

    /// Check whether a transaction of `txn_type` may use this category
    pub fn accepts(&self, txn_type: TransactionType) -> bool {
        self.category_type == txn_type
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.chars().count() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.chars().count()));
        }

        let hex = self.color.strip_prefix('#').unwrap_or("");
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The category set seeded into a fresh ledger: (name, type, icon, colour)
pub const DEFAULT_CATEGORIES: &[(&str, TransactionType, &str, &str)] = &[
    ("Salary", TransactionType::Income, "💰", "#4CAF50"),
    ("Freelance", TransactionType::Income, "💼", "#2196F3"),
    ("Business", TransactionType::Income, "🏢", "#FF9800"),
    ("Investments", TransactionType::Income, "📈", "#9C27B0"),
    ("Rental Income", TransactionType::Income, "🏠", "#607D8B"),
    ("Side Hustle", TransactionType::Income, "⚡", "#00BCD4"),
    ("Gifts Received", TransactionType::Income, "🎁", "#E91E63"),
    ("Other Income", TransactionType::Income, "💵", "#795548"),
    ("Food & Dining", TransactionType::Expense, "🍽️", "#F44336"),
    ("Transportation", TransactionType::Expense, "🚗", "#3F51B5"),
    ("Housing", TransactionType::Expense, "🏠", "#795548"),
    ("Utilities", TransactionType::Expense, "⚡", "#FF5722"),
    ("Healthcare", TransactionType::Expense, "🏥", "#E91E63"),
    ("Entertainment", TransactionType::Expense, "🎬", "#9C27B0"),
    ("Shopping", TransactionType::Expense, "🛒", "#FF9800"),
    ("Education", TransactionType::Expense, "📚", "#2196F3"),
    ("Insurance", TransactionType::Expense, "🛡️", "#607D8B"),
    ("Fitness", TransactionType::Expense, "💪", "#4CAF50"),
    ("Travel", TransactionType::Expense, "✈️", "#00BCD4"),
    ("Personal Care", TransactionType::Expense, "💅", "#E91E63"),
    ("Gifts & Donations", TransactionType::Expense, "🎁", "#9C27B0"),
    ("Subscriptions", TransactionType::Expense, "📱", "#FF5722"),
    ("Other Expenses", TransactionType::Expense, "💸", "#607D8B"),
];

/// Build fresh category records for the default set
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, category_type, icon, color)| {
            let mut category = Category::styled(*name, *category_type, *icon, *color);
            category.is_default = true;
            category
        })
        .collect()
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::InvalidColor(color) => write!(f, "Invalid colour '{}', expected #RRGGBB", color),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
