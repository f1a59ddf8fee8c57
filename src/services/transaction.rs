//! Transaction service
//!
//! The ledger write path: validated inserts, edits and deletes, scoped to
//! the owning user.

use chrono::{Months, NaiveDate};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryId, Money, Transaction, TransactionId, TransactionType, UserId};
use crate::storage::Storage;

/// Largest accepted single amount (1,000,000.00)
pub const MAX_TRANSACTION_AMOUNT: Money = Money::from_cents(100_000_000);

/// How far ahead a transaction may be dated
pub const MAX_FUTURE_DAYS: i64 = 30;

/// How far back a transaction may be dated
pub const MAX_PAST_YEARS: u32 = 10;

/// Longest accepted description, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub user_id: UserId,
    pub txn_type: TransactionType,
    pub amount: Money,
    pub date: NaiveDate,
    pub category_id: Option<CategoryId>,
    pub description: Option<String>,
}

/// Fields to change on an existing transaction; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub txn_type: Option<TransactionType>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    /// `Some(None)` clears the category
    pub category_id: Option<Option<CategoryId>>,
    pub description: Option<String>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.txn_type.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.category_id.is_none()
            && self.description.is_none()
    }
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and record a new transaction. `today` bounds the date window.
    pub fn add(&self, input: CreateTransactionInput, today: NaiveDate) -> LedgerResult<Transaction> {
        let description = input.description.unwrap_or_default().trim().to_string();
        let txn = Transaction::with_details(
            input.user_id,
            input.txn_type,
            input.amount,
            input.date,
            input.category_id,
            description,
        );
        self.check(&txn, today)?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        tracing::info!(id = %txn.id, kind = %txn.txn_type, amount = %txn.amount, "recorded transaction");
        Ok(txn)
    }

    /// Apply `patch` to one of the user's transactions. The edited record
    /// goes through the same checks as [`add`](Self::add).
    pub fn update(
        &self,
        user_id: UserId,
        id: TransactionId,
        patch: TransactionPatch,
        today: NaiveDate,
    ) -> LedgerResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .filter(|t| t.user_id == user_id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

        if patch.is_empty() {
            return Err(LedgerError::Validation("Nothing to update".into()));
        }

        if let Some(txn_type) = patch.txn_type {
            txn.txn_type = txn_type;
        }
        if let Some(amount) = patch.amount {
            txn.amount = amount;
        }
        if let Some(date) = patch.date {
            txn.date = date;
        }
        if let Some(category_id) = patch.category_id {
            txn.category_id = category_id;
        }
        if let Some(description) = patch.description {
            txn.description = description.trim().to_string();
        }
        self.check(&txn, today)?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        tracing::info!(id = %txn.id, "updated transaction");
        Ok(txn)
    }

    /// Write-path rules shared by inserts and edits
    fn check(&self, txn: &Transaction, today: NaiveDate) -> LedgerResult<()> {
        if !txn.amount.is_positive() {
            return Err(LedgerError::Validation(
                "Amount must be greater than zero".into(),
            ));
        }
        if txn.amount > MAX_TRANSACTION_AMOUNT {
            return Err(LedgerError::Validation(format!(
                "Amount cannot exceed {}",
                MAX_TRANSACTION_AMOUNT
            )));
        }

        if (txn.date - today).num_days() > MAX_FUTURE_DAYS {
            return Err(LedgerError::Validation(format!(
                "Date {} is more than {} days in the future",
                txn.date, MAX_FUTURE_DAYS
            )));
        }
        let earliest = today
            .checked_sub_months(Months::new(12 * MAX_PAST_YEARS))
            .unwrap_or(NaiveDate::MIN);
        if txn.date < earliest {
            return Err(LedgerError::Validation(format!(
                "Date {} is more than {} years in the past",
                txn.date, MAX_PAST_YEARS
            )));
        }

        if txn.description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(LedgerError::Validation(format!(
                "Description is longer than {} characters",
                MAX_DESCRIPTION_CHARS
            )));
        }

        if let Some(category_id) = txn.category_id {
            let category = self
                .storage
                .categories
                .get(category_id)?
                .ok_or_else(|| LedgerError::category_not_found(category_id.to_string()))?;
            if !category.accepts(txn.txn_type) {
                return Err(LedgerError::Validation(format!(
                    "Category '{}' is for {} transactions, not {}",
                    category.name, category.category_type, txn.txn_type
                )));
            }
        }

        txn.validate()?;
        Ok(())
    }

    /// Delete one of the user's transactions
    pub fn delete(&self, user_id: UserId, id: TransactionId) -> LedgerResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .get(id)?
            .filter(|t| t.user_id == user_id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        tracing::info!(id = %id, "deleted transaction");
        Ok(txn)
    }

    /// Find one of the user's transactions by full or short ID
    pub fn find(&self, user_id: UserId, id: &str) -> LedgerResult<Transaction> {
        let needle = id.trim();
        let short = needle.strip_prefix("txn-").unwrap_or(needle);

        let mut matches = self
            .storage
            .transactions
            .get_by_user(user_id)?
            .into_iter()
            .filter(|t| !short.is_empty() && t.id.as_uuid().to_string().starts_with(short));

        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(txn),
            (Some(_), Some(_)) => Err(LedgerError::Validation(format!(
                "Transaction ID '{}' is ambiguous",
                needle
            ))),
            _ => Err(LedgerError::transaction_not_found(needle)),
        }
    }
}
