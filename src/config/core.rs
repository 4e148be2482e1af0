use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::persistence::{BACKUP_FILE, DEFAULT_DATA_FILE};
use crate::store::DEFAULT_CAPACITY;

/// Root configuration structure for gradebook
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GradebookConfig {
    /// Data and backup file locations
    #[serde(default)]
    pub storage: Option<StorageConfig>,

    /// Record store sizing
    #[serde(default)]
    pub store: Option<StoreConfig>,

    /// Terminal output options
    #[serde(default)]
    pub display: Option<DisplayConfig>,
}

impl GradebookConfig {
    /// Data file path, falling back to `students.csv`
    ///
    /// # Examples
    ///
    /// ```
    /// use gradebook::config::GradebookConfig;
    /// let config = GradebookConfig::default();
    /// assert_eq!(config.data_file().to_str(), Some("students.csv"));
    /// ```
    pub fn data_file(&self) -> PathBuf {
        self.storage
            .as_ref()
            .and_then(|s| s.data_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    /// Backup file path, falling back to `students_backup.csv`
    pub fn backup_file(&self) -> PathBuf {
        self.storage
            .as_ref()
            .and_then(|s| s.backup_file.clone())
            .unwrap_or_else(|| PathBuf::from(BACKUP_FILE))
    }

    pub fn capacity(&self) -> usize {
        self.store
            .as_ref()
            .and_then(|s| s.capacity)
            .unwrap_or(DEFAULT_CAPACITY)
    }

    pub fn plain(&self) -> bool {
        self.display.as_ref().and_then(|d| d.plain).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub backup_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StoreConfig {
    /// Maximum number of student records
    #[serde(default)]
    pub capacity: Option<usize>,
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), String> {
        match self.capacity {
            Some(0) => Err("store capacity must be at least 1".to_string()),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DisplayConfig {
    /// Disable colored output
    #[serde(default)]
    pub plain: Option<bool>,
}
