//! Custom error types for ledger-lens
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for ledger-lens operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Malformed or contradictory input, rejected before any computation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for LedgerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<crate::models::PeriodError> for LedgerError {
    fn from(err: crate::models::PeriodError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<crate::models::money::MoneyParseError> for LedgerError {
    fn from(err: crate::models::money::MoneyParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<crate::models::transaction::TransactionValidationError> for LedgerError {
    fn from(err: crate::models::transaction::TransactionValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<crate::models::category::CategoryValidationError> for LedgerError {
    fn from(err: crate::models::category::CategoryValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<crate::models::budget::BudgetValidationError> for LedgerError {
    fn from(err: crate::models::budget::BudgetValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for ledger-lens operations
pub type LedgerResult<T> = Result<T, LedgerError>;
