//! Read-only reporting over a record store.
//!
//! Nothing here mutates the store: ranking sorts a view of references, and
//! statistics and queries borrow records for the lifetime of the result.

pub mod queries;
pub mod ranking;
pub mod statistics;

pub use queries::{gpa_range, students_with_grade, GradeMatch};
pub use ranking::{competition_ranks, rank_by_gpa, RankedRecord};
pub use statistics::{
    class_statistics, count_students_with_subject, subject_average, subject_statistics,
    top_student, ClassStatistics, GpaBand, GpaDistribution, SubjectStatistics,
};
