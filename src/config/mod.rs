//! Configuration module for ledger-lens
//!
//! This module provides:
//! - Data directory resolution
//! - Persisted user settings and report defaults

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
