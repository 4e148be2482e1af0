//! File operations: save, load, import (merge), backup and restore.
//!
//! Loading reads the whole file before touching the store, so a file that
//! cannot be opened or read leaves the store exactly as it was. Once the
//! header has been read, bad lines are recovered locally: they are logged,
//! recorded in the [`LoadSummary`] and skipped.

use super::codec::{parse_record_line, serialize_store};
use crate::core::{GradebookError, Result};
use crate::io::{self, TextFile};
use crate::store::{Admission, RecordStore};
use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info, info_span, warn};

/// Default data file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "students.csv";
/// Fixed backup location used by [`create_backup`] and [`restore_from_backup`]
pub const BACKUP_FILE: &str = "students_backup.csv";

/// What a load, restore or import did with each line of the file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    /// Records added to the store
    pub loaded: usize,
    /// Lines whose id was already in the store
    pub skipped_duplicates: usize,
    /// 1-based line numbers of lines with fewer than four fields
    pub rejected_lines: Vec<usize>,
    /// The store filled up before the end of the file
    pub stopped_at_capacity: bool,
    /// Bytes that were not valid UTF-8 were replaced while decoding
    pub replaced_invalid_utf8: bool,
}

impl LoadSummary {
    pub fn rejected(&self) -> usize {
        self.rejected_lines.len()
    }

    /// Every data line was accepted
    pub fn is_clean(&self) -> bool {
        self.skipped_duplicates == 0
            && self.rejected_lines.is_empty()
            && !self.stopped_at_capacity
            && !self.replaced_invalid_utf8
    }
}

/// Overwrite `path` with the serialized store. Returns the number of records
/// written.
pub fn save_data(store: &RecordStore, path: &Path) -> Result<usize> {
    let _span = info_span!("save", path = %path.display()).entered();

    io::write_file(path, &serialize_store(store)).map_err(|e| GradebookError::write(path, e))?;
    info!(records = store.len(), "data saved");
    Ok(store.len())
}

/// Save to an arbitrary path
pub fn export_to_file(store: &RecordStore, path: &Path) -> Result<usize> {
    save_data(store, path)
}

/// Replace the store's records with the contents of `path`
pub fn load_data(store: &mut RecordStore, path: &Path) -> Result<LoadSummary> {
    let _span = info_span!("load", path = %path.display()).entered();

    let text = read_with_header(path)?;
    store.clear();
    let mut summary = read_records(store, data_lines(&text.content));
    summary.replaced_invalid_utf8 = text.lossy;
    info!(loaded = summary.loaded, rejected = summary.rejected(), "data loaded");
    Ok(summary)
}

/// Merge the records of `path` into the store, skipping ids already present
pub fn import_from_file(store: &mut RecordStore, path: &Path) -> Result<LoadSummary> {
    let _span = info_span!("import", path = %path.display()).entered();

    if !io::file_exists(path) {
        return Err(GradebookError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = read_with_header(path)?;
    let mut summary = read_records(store, data_lines(&text.content));
    summary.replaced_invalid_utf8 = text.lossy;
    info!(
        imported = summary.loaded,
        skipped = summary.skipped_duplicates,
        total = store.len(),
        "import finished"
    );
    Ok(summary)
}

/// Copy `source` byte for byte to [`BACKUP_FILE`]
pub fn create_backup(source: &Path) -> Result<u64> {
    create_backup_at(source, Path::new(BACKUP_FILE))
}

/// Copy `source` byte for byte to `backup`. Returns the bytes copied.
pub fn create_backup_at(source: &Path, backup: &Path) -> Result<u64> {
    let _span = info_span!("backup", source = %source.display(), backup = %backup.display())
        .entered();

    if !io::file_exists(source) {
        return Err(GradebookError::FileNotFound {
            path: source.to_path_buf(),
        });
    }

    if is_same_file(source, backup) {
        return Err(GradebookError::BackupOverwritesSource {
            path: backup.to_path_buf(),
        });
    }

    let mut reader = File::open(source).map_err(|e| GradebookError::read(source, e))?;
    let mut writer = File::create(backup).map_err(|e| GradebookError::write(backup, e))?;
    let bytes = std::io::copy(&mut reader, &mut writer)
        .map_err(|e| GradebookError::write(backup, e))?;

    info!(bytes, "backup created");
    Ok(bytes)
}

/// Load from [`BACKUP_FILE`]
pub fn restore_from_backup(store: &mut RecordStore) -> Result<LoadSummary> {
    restore_from(store, Path::new(BACKUP_FILE))
}

/// Load from an explicit backup path
pub fn restore_from(store: &mut RecordStore, backup: &Path) -> Result<LoadSummary> {
    if !io::file_exists(backup) {
        return Err(GradebookError::FileNotFound {
            path: backup.to_path_buf(),
        });
    }
    load_data(store, backup)
}

/// True iff the file opens and its first line names both `ID` and `Name`
pub fn is_valid_format(path: &Path) -> bool {
    match io::read_first_line(path) {
        Ok(Some(header)) => header.contains("ID") && header.contains("Name"),
        Ok(None) => false,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot read header");
            false
        }
    }
}

pub fn file_exists(path: &Path) -> bool {
    io::file_exists(path)
}

/// Both paths exist and resolve to one file
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn read_with_header(path: &Path) -> Result<TextFile> {
    let text = io::read_file(path).map_err(|e| GradebookError::read(path, e))?;
    if text.content.lines().next().is_none() {
        return Err(GradebookError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    if text.lossy {
        warn!("file is not valid UTF-8, invalid bytes were replaced");
    }
    Ok(text)
}

/// Data lines with their 1-based file line numbers; the header is skipped
fn data_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .skip(1)
        .map(|(index, line)| (index + 1, line))
}

fn read_records<'a>(
    store: &mut RecordStore,
    lines: impl Iterator<Item = (usize, &'a str)>,
) -> LoadSummary {
    let mut summary = LoadSummary::default();

    for (line_number, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(record) = parse_record_line(line) else {
            warn!(line = line_number, "rejecting line with fewer than 4 fields");
            summary.rejected_lines.push(line_number);
            continue;
        };

        let id = record.id();
        match store.admit(record) {
            Admission::Added => summary.loaded += 1,
            Admission::Duplicate => {
                warn!(line = line_number, id, "skipping duplicate student id");
                summary.skipped_duplicates += 1;
            }
            Admission::Full => {
                warn!(
                    line = line_number,
                    capacity = store.capacity(),
                    "store is full, ignoring the rest of the file"
                );
                summary.stopped_at_capacity = true;
                break;
            }
        }
    }

    summary
}
