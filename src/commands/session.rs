//! One command invocation: configuration, the loaded store and the formatter.

use crate::config::GradebookConfig;
use crate::core::GradebookError;
use crate::formatting::{Formatter, FormattingConfig};
use crate::persistence::{self, LoadSummary};
use crate::store::RecordStore;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct Session {
    store: RecordStore,
    data_file: PathBuf,
    backup_file: PathBuf,
    formatter: Formatter,
    /// The data file had lines the load could not keep
    lossy_load: bool,
    allow_lossy_save: bool,
}

impl Session {
    /// Build the store from `config` and load the data file when it exists.
    ///
    /// `data_file` overrides the configured path; `plain` forces uncolored
    /// output on top of the environment and configuration.
    pub fn open(config: &GradebookConfig, data_file: Option<PathBuf>, plain: bool) -> Result<Self> {
        let data_file = data_file.unwrap_or_else(|| config.data_file());
        let mut store = RecordStore::with_capacity(config.capacity())?;
        let mut lossy_load = false;

        if persistence::file_exists(&data_file) {
            match persistence::load_data(&mut store, &data_file) {
                Ok(summary) => {
                    report_load_issues(&data_file, &summary);
                    lossy_load = !summary.is_clean();
                }
                Err(GradebookError::EmptyFile { .. }) => {
                    warn!(path = %data_file.display(), "data file is empty, starting fresh");
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Failed to load data file {}", data_file.display())
                    })
                }
            }
        }

        let formatting = if plain || config.plain() {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env()
        };

        Ok(Self {
            store,
            data_file,
            backup_file: config.backup_file(),
            formatter: Formatter::new(formatting),
            lossy_load,
            allow_lossy_save: false,
        })
    }

    /// Permit [`Session::save`] after a load that dropped lines
    pub fn allow_lossy_save(mut self, allow: bool) -> Self {
        self.allow_lossy_save = allow;
        self
    }

    /// The store no longer derives from the data file, so nothing in the
    /// file is lost by overwriting it
    pub fn replace_contents(&mut self) {
        self.lossy_load = false;
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn backup_file(&self) -> &Path {
        &self.backup_file
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Write the store back to the data file.
    ///
    /// Refused when the load skipped lines of the data file, unless
    /// [`Session::allow_lossy_save`] was set.
    pub fn save(&self) -> Result<()> {
        if self.lossy_load && !self.allow_lossy_save {
            anyhow::bail!(
                "{} did not load cleanly and saving would drop the skipped lines. \
                 Fix the file or re-run with --allow-lossy-save.",
                self.data_file.display()
            );
        }
        persistence::save_data(&self.store, &self.data_file)
            .with_context(|| format!("Failed to save {}", self.data_file.display()))?;
        Ok(())
    }
}

pub(crate) fn report_load_issues(path: &Path, summary: &LoadSummary) {
    if !summary.rejected_lines.is_empty() {
        warn!(
            path = %path.display(),
            lines = ?summary.rejected_lines,
            "skipped lines with fewer than four fields"
        );
    }
    if summary.skipped_duplicates > 0 {
        warn!(
            path = %path.display(),
            count = summary.skipped_duplicates,
            "skipped records with duplicate ids"
        );
    }
    if summary.stopped_at_capacity {
        warn!(path = %path.display(), "store is full, remaining lines were not read");
    }
    if summary.replaced_invalid_utf8 {
        warn!(path = %path.display(), "invalid UTF-8 bytes were replaced");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{StorageConfig, StoreConfig};
    use tempfile::TempDir;

    fn config_in(dir: &TempDir, capacity: usize) -> GradebookConfig {
        GradebookConfig {
            storage: Some(StorageConfig {
                data_file: Some(dir.path().join("students.csv")),
                backup_file: Some(dir.path().join("backup.csv")),
            }),
            store: Some(StoreConfig {
                capacity: Some(capacity),
            }),
            display: None,
        }
    }

    #[test]
    fn test_open_without_data_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let session = Session::open(&config_in(&dir, 5), None, true).unwrap();
        assert!(session.store().is_empty());
        assert_eq!(session.store().capacity(), 5);
        assert_eq!(session.backup_file(), dir.path().join("backup.csv"));
    }

    #[test]
    fn test_save_then_reopen() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, 5);

        let mut session = Session::open(&config, None, true).unwrap();
        session
            .store_mut()
            .add(1, "Lee Jiwoo", "Biology", "2024-03-02")
            .unwrap();
        session.save().unwrap();

        let reopened = Session::open(&config, None, true).unwrap();
        assert_eq!(reopened.store().len(), 1);
        assert_eq!(reopened.store().records()[0].name(), "Lee Jiwoo");
    }

    #[test]
    fn test_empty_data_file_is_tolerated() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, 5);
        std::fs::write(dir.path().join("students.csv"), "").unwrap();

        let session = Session::open(&config, None, true).unwrap();
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_save_after_lossy_load_needs_permission() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, 5);
        let path = dir.path().join("students.csv");
        let content = "ID,Name,Major,Reg_Date,Grades\n1,Kim,CS,2024-03-01,\n2,Lee\n";
        std::fs::write(&path, content).unwrap();

        let session = Session::open(&config, None, true).unwrap();
        assert_eq!(session.store().len(), 1);
        assert!(session.save().is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);

        let session = Session::open(&config, None, true)
            .unwrap()
            .allow_lossy_save(true);
        session.save().unwrap();
        assert!(!std::fs::read_to_string(&path).unwrap().contains("2,Lee"));
    }

    #[test]
    fn test_replaced_contents_can_be_saved() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, 1);
        std::fs::write(
            dir.path().join("students.csv"),
            "ID,Name,Major,Reg_Date,Grades\n1,Kim,CS,d,\n2,Lee,CS,d,\n",
        )
        .unwrap();

        let mut session = Session::open(&config, None, true).unwrap();
        assert!(session.save().is_err());
        session.replace_contents();
        session.save().unwrap();
    }

    #[test]
    fn test_data_file_override() {
        let dir = TempDir::new().unwrap();
        let other = dir.path().join("other.csv");
        let session = Session::open(&config_in(&dir, 5), Some(other.clone()), true).unwrap();
        assert_eq!(session.data_file(), other.as_path());
    }
}
