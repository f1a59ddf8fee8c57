//! Path management for ledger-lens
//!
//! ## Path Resolution Order
//!
//! 1. `LEDGER_LENS_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from [`directories::ProjectDirs`]
//!    (`~/.config/ledger-lens` on Linux)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{LedgerError, LedgerResult};

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "LEDGER_LENS_DATA_DIR";

/// Manages all paths used by ledger-lens
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Resolve the base directory from the environment or the platform default
    pub fn new() -> LedgerResult<Self> {
        if let Some(custom) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_base_dir(PathBuf::from(custom)));
        }

        let dirs = ProjectDirs::from("", "", "ledger-lens").ok_or_else(|| {
            LedgerError::Config("Could not determine a home directory".to_string())
        })?;
        Ok(Self::with_base_dir(dirs.config_dir().to_path_buf()))
    }

    /// Use an explicit base directory (tests, `--data-dir`)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding the ledger files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    /// Create the base and data directories
    pub fn ensure_directories(&self) -> LedgerResult<()> {
        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            LedgerError::Io(format!(
                "Failed to create data directory {}: {}",
                self.data_dir().display(),
                e
            ))
        })
    }

    /// A ledger is initialized once its settings file exists
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_layout() {
        let paths = LedgerPaths::with_base_dir(PathBuf::from("/tmp/ledger"));
        assert_eq!(paths.settings_file(), PathBuf::from("/tmp/ledger/config.json"));
        assert_eq!(
            paths.transactions_file(),
            PathBuf::from("/tmp/ledger/data/transactions.json")
        );
        assert_eq!(
            paths.budgets_file(),
            PathBuf::from("/tmp/ledger/data/budgets.json")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().join("nested"));
        assert!(!paths.is_initialized());

        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().is_dir());
    }
}
