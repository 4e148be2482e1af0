//! Core data model and error types shared by every other module.

pub mod errors;
pub mod types;

pub use errors::{ErrorKind, GradebookError, Result};
pub use types::{
    GradeDistribution, Identity, LetterGrade, StudentRecord, SubjectGrade, MAX_MAJOR_LEN,
    MAX_NAME_LEN, MAX_REG_DATE_LEN, MAX_SUBJECTS, MAX_SUBJECT_LEN,
};
