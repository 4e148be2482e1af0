//! Shared error types for the application

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gradebook operations
///
/// Every single-record operation fails with exactly one of these variants and
/// leaves the store untouched. Line-level problems during a bulk load are not
/// errors; they are collected in [`crate::persistence::LoadSummary`] instead.
#[derive(Debug, Error)]
pub enum GradebookError {
    /// A record with this id is already in the store
    #[error("student id {id} already exists")]
    DuplicateId { id: i32 },

    /// No record carries this id
    #[error("student id {id} not found")]
    StudentNotFound { id: i32 },

    /// The record has no grade for this subject
    #[error("subject '{subject}' not found")]
    SubjectNotFound { subject: String },

    /// The store already holds `capacity` records
    #[error("store is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    /// The record already holds the maximum number of subjects
    #[error("record already holds the maximum of {max} subjects")]
    TooManySubjects { max: usize },

    /// Score outside 0.0..=100.0
    #[error("invalid score {score} (expected 0.0 to 100.0)")]
    InvalidScore { score: f64 },

    /// Credit outside 1..=4
    #[error("invalid credit {credit} (expected 1 to 4)")]
    InvalidCredit { credit: i32 },

    /// The record already has a grade for this subject
    #[error("subject '{subject}' is already registered")]
    DuplicateSubject { subject: String },

    /// Backing storage for the store could not be reserved
    #[error("could not allocate storage for {capacity} records")]
    AllocationError { capacity: usize },

    /// File does not exist
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// File exists but could not be read
    #[error("cannot read {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File could not be created or written
    #[error("cannot write {}: {source}", path.display())]
    FileUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backup source and destination resolve to the same file
    #[error("backup target is the data file itself: {}", path.display())]
    BackupOverwritesSource { path: PathBuf },

    /// File has no header line
    #[error("file is empty or has no header line: {}", path.display())]
    EmptyFile { path: PathBuf },
}

/// Flat classification of [`GradebookError`] for callers that only need to
/// know which failure happened, not its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    DuplicateId,
    /// Missing id or missing subject
    NotFound,
    CapacityExceeded,
    TooManySubjects,
    InvalidScore,
    InvalidCredit,
    DuplicateSubject,
    AllocationError,
    FileNotFound,
    FileUnreadable,
    FileUnwritable,
}

impl GradebookError {
    /// Get the flat error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateId { .. } => ErrorKind::DuplicateId,
            Self::StudentNotFound { .. } | Self::SubjectNotFound { .. } => ErrorKind::NotFound,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::TooManySubjects { .. } => ErrorKind::TooManySubjects,
            Self::InvalidScore { .. } => ErrorKind::InvalidScore,
            Self::InvalidCredit { .. } => ErrorKind::InvalidCredit,
            Self::DuplicateSubject { .. } => ErrorKind::DuplicateSubject,
            Self::AllocationError { .. } => ErrorKind::AllocationError,
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::FileUnreadable { .. } | Self::EmptyFile { .. } => ErrorKind::FileUnreadable,
            Self::FileUnwritable { .. } | Self::BackupOverwritesSource { .. } => {
                ErrorKind::FileUnwritable
            }
        }
    }

    /// Create a read error, mapping `NotFound` to [`GradebookError::FileNotFound`]
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileUnreadable { path, source }
        }
    }

    /// Create a write error with path context
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileUnwritable {
            path: path.into(),
            source,
        }
    }

    /// True for failures caused by the file system rather than by the data
    pub fn is_file_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::FileNotFound | ErrorKind::FileUnreadable | ErrorKind::FileUnwritable
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, GradebookError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found_kinds_collapse() {
        let id = GradebookError::StudentNotFound { id: 7 };
        let subject = GradebookError::SubjectNotFound {
            subject: "Math".into(),
        };
        assert_eq!(id.kind(), ErrorKind::NotFound);
        assert_eq!(subject.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_read_maps_missing_file() {
        let err = GradebookError::read("x.csv", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, GradebookError::FileNotFound { .. }));

        let err = GradebookError::read(
            "x.csv",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert_eq!(err.kind(), ErrorKind::FileUnreadable);
        assert!(err.is_file_error());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            GradebookError::DuplicateId { id: 2024001 }.to_string(),
            "student id 2024001 already exists"
        );
        assert_eq!(
            GradebookError::InvalidCredit { credit: 5 }.to_string(),
            "invalid credit 5 (expected 1 to 4)"
        );
        assert!(!GradebookError::TooManySubjects { max: 10 }.is_file_error());
    }
}
