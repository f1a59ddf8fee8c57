//! Transaction search
//!
//! Multi-criteria filtering with a total, reproducible order, plus
//! pagination of the result.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::period::parse_date;
use crate::models::{CategoryId, Transaction, TransactionType};

/// Transaction type criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn matches(&self, txn_type: TransactionType) -> bool {
        match self {
            Self::All => true,
            Self::Income => txn_type == TransactionType::Income,
            Self::Expense => txn_type == TransactionType::Expense,
        }
    }
}

impl From<TransactionType> for TypeFilter {
    fn from(txn_type: TransactionType) -> Self {
        match txn_type {
            TransactionType::Income => Self::Income,
            TransactionType::Expense => Self::Expense,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(LedgerError::Validation(format!(
                "Unknown type '{}' (all, income, expense)",
                other
            ))),
        }
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl SortOrder {
    /// Compare two transactions; equal keys fall back to ascending ID
    pub fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        let primary = match self {
            Self::DateDesc => b.date.cmp(&a.date),
            Self::DateAsc => a.date.cmp(&b.date),
            Self::AmountDesc => b.amount.cmp(&a.amount),
            Self::AmountAsc => a.amount.cmp(&b.amount),
        };
        primary.then(a.id.cmp(&b.id))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateDesc => "date_desc",
            Self::DateAsc => "date_asc",
            Self::AmountDesc => "amount_desc",
            Self::AmountAsc => "amount_asc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "date_desc" => Ok(Self::DateDesc),
            "date_asc" => Ok(Self::DateAsc),
            "amount_desc" => Ok(Self::AmountDesc),
            "amount_asc" => Ok(Self::AmountAsc),
            other => Err(LedgerError::Validation(format!(
                "Unknown sort '{}' (date_desc, date_asc, amount_desc, amount_asc)",
                other
            ))),
        }
    }
}

/// Validated search criteria; every supplied criterion must hold
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    pub txn_type: TypeFilter,
    pub category_id: Option<CategoryId>,
    /// Inclusive lower bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive substring of the description
    pub text: Option<String>,
    pub sort_by: SortOrder,
}

impl TransactionQuery {
    /// Reject contradictory criteria
    pub fn validate(&self) -> LedgerResult<()> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(LedgerError::Validation(format!(
                    "end_date {} precedes start_date {}",
                    end, start
                )));
            }
        }
        Ok(())
    }

    /// Check if a transaction satisfies every criterion
    pub fn matches(&self, txn: &Transaction) -> bool {
        self.matches_with(txn, self.needle().as_deref())
    }

    fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    fn matches_with(&self, txn: &Transaction, needle: Option<&str>) -> bool {
        if !self.txn_type.matches(txn.txn_type) {
            return false;
        }

        if let Some(category_id) = self.category_id {
            if txn.category_id != Some(category_id) {
                return false;
            }
        }

        if let Some(start) = self.start_date {
            if txn.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if txn.date > end {
                return false;
            }
        }

        match needle {
            Some(needle) => txn.description.to_lowercase().contains(needle),
            None => true,
        }
    }
}

/// Filter and order `transactions`. An empty result is not an error.
pub fn query<'a>(
    transactions: &'a [Transaction],
    criteria: &TransactionQuery,
) -> LedgerResult<Vec<&'a Transaction>> {
    criteria.validate()?;

    let needle = criteria.needle();
    let mut matched: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| criteria.matches_with(t, needle.as_deref()))
        .collect();
    matched.sort_by(|a, b| criteria.sort_by.compare(a, b));

    tracing::debug!(
        candidates = transactions.len(),
        matched = matched.len(),
        sort = %criteria.sort_by,
        "ran transaction query"
    );
    Ok(matched)
}

/// Raw query-string style parameters; every field optional, blank means absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    #[serde(rename = "type", default)]
    pub txn_type: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_param_date(name: &str, value: &str) -> LedgerResult<NaiveDate> {
    parse_date(value)
        .map_err(|_| LedgerError::Validation(format!("{} '{}' is not a YYYY-MM-DD date", name, value)))
}

impl TryFrom<QueryParams> for TransactionQuery {
    type Error = LedgerError;

    fn try_from(params: QueryParams) -> Result<Self, Self::Error> {
        let query = Self {
            txn_type: present(&params.txn_type)
                .map(str::parse::<TypeFilter>)
                .transpose()?
                .unwrap_or_default(),
            category_id: present(&params.category_id)
                .map(|id| {
                    id.parse::<CategoryId>().map_err(|_| {
                        LedgerError::Validation(format!("category_id '{}' is not a valid ID", id))
                    })
                })
                .transpose()?,
            start_date: present(&params.start_date)
                .map(|d| parse_param_date("start_date", d))
                .transpose()?,
            end_date: present(&params.end_date)
                .map(|d| parse_param_date("end_date", d))
                .transpose()?,
            text: present(&params.q).map(str::to_string),
            sort_by: present(&params.sort_by)
                .map(str::parse::<SortOrder>)
                .transpose()?
                .unwrap_or_default(),
        };
        query.validate()?;
        Ok(query)
    }
}

/// One page of a result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Size of the whole result set
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

/// Cut `items[offset..offset + limit]` out of a result set
pub fn paginate<T>(items: Vec<T>, limit: usize, offset: usize) -> Page<T> {
    let total = items.len();
    let items: Vec<T> = items.into_iter().skip(offset).take(limit).collect();
    let has_more = offset.saturating_add(items.len()) < total;

    Page {
        items,
        total,
        limit,
        offset,
        has_more,
    }
}
