//! Transaction model
//!
//! Represents a single income or expense entry in a user's ledger.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, TransactionId, UserId};
use super::money::Money;

/// Direction of a transaction (also the kind of category it may use)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Lowercase wire name ("income" / "expense")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = TransactionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(TransactionValidationError::UnknownType(other.to_string())),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Owner of this transaction
    pub user_id: UserId,

    /// Income or expense
    #[serde(rename = "type")]
    pub txn_type: TransactionType,

    /// Always positive; direction comes from `txn_type`
    pub amount: Money,

    /// Category (None means "Uncategorized")
    pub category_id: Option<CategoryId>,

    /// Calendar date, no time component
    pub date: NaiveDate,

    /// Free text, may be empty
    #[serde(default)]
    pub description: String,

    /// When the transaction was recorded (audit only)
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        user_id: UserId,
        txn_type: TransactionType,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            user_id,
            txn_type,
            amount,
            category_id: None,
            date,
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a transaction with all common fields
    pub fn with_details(
        user_id: UserId,
        txn_type: TransactionType,
        amount: Money,
        date: NaiveDate,
        category_id: Option<CategoryId>,
        description: impl Into<String>,
    ) -> Self {
        let mut txn = Self::new(user_id, txn_type, amount, date);
        txn.category_id = category_id;
        txn.description = description.into();
        txn
    }

    /// Check if this is income
    pub fn is_income(&self) -> bool {
        self.txn_type == TransactionType::Income
    }

    /// Check if this is an expense
    pub fn is_expense(&self) -> bool {
        self.txn_type == TransactionType::Expense
    }

    /// Validate the record invariants
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.txn_type,
            self.amount,
            self.description
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    UnknownType(String),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive, got {}", amount)
            }
            Self::UnknownType(s) => {
                write!(f, "Unknown transaction type '{}' (income, expense)", s)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
