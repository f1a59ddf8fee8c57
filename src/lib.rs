//! ledger-lens - personal-finance ledger analytics
//!
//! This library records income and expense transactions for a user and
//! computes read-only reports over them: period summaries, monthly trends,
//! budget performance, spending insights, filtered search and CSV export.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and persisted settings
//! - `error`: Custom error types
//! - `models`: Transactions, categories, budgets and their value types
//! - `storage`: JSON file storage layer and point-in-time snapshots
//! - `reports`: Pure report computations over a snapshot
//! - `services`: Request boundary: validation, defaults and persistence
//! - `export`: CSV, JSON and YAML writers
//! - `display`: Terminal tables
//! - `cli`: Command handlers for the `ledger` binary
//! - `logging`: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use ledger_lens::config::{paths::LedgerPaths, settings::Settings};
//! use ledger_lens::services::AnalyticsService;
//! use ledger_lens::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! let summary = AnalyticsService::new(&storage, &settings)
//!     .summary(settings.user_id, range)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
