// Export modules for library usage
pub mod analytics;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod grading;
pub mod io;
pub mod persistence;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    ErrorKind, GradeDistribution, GradebookError, Identity, LetterGrade, Result, StudentRecord,
    SubjectGrade, MAX_MAJOR_LEN, MAX_NAME_LEN, MAX_REG_DATE_LEN, MAX_SUBJECTS, MAX_SUBJECT_LEN,
};

pub use crate::grading::{
    is_valid_credit, is_valid_score, score_to_grade, weighted_gpa, GPA_SCALE, MAX_GPA,
};

pub use crate::store::{InfoUpdate, RecordStore, DEFAULT_CAPACITY};

pub use crate::analytics::{
    class_statistics, gpa_range, rank_by_gpa, students_with_grade, subject_statistics,
    ClassStatistics, GpaBand, RankedRecord, SubjectStatistics,
};

pub use crate::persistence::{
    create_backup, export_to_file, import_from_file, load_data, restore_from_backup, save_data,
    LoadSummary, BACKUP_FILE, DEFAULT_DATA_FILE,
};
