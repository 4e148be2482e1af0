use crate::core::{LetterGrade, StudentRecord, SubjectGrade};
use crate::store::RecordStore;
use serde::Serialize;

/// Records with `min_gpa <= gpa <= max_gpa`, in store order.
///
/// Bounds are taken as given; clamping and rejecting inverted ranges is the
/// caller's job.
pub fn gpa_range(store: &RecordStore, min_gpa: f64, max_gpa: f64) -> Vec<&StudentRecord> {
    store
        .iter()
        .filter(|r| r.gpa() >= min_gpa && r.gpa() <= max_gpa)
        .collect()
}

/// A record paired with one of its grades
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GradeMatch<'a> {
    pub record: &'a StudentRecord,
    pub grade: &'a SubjectGrade,
}

/// Every (record, grade) pair whose letter is exactly `target`
pub fn students_with_grade(store: &RecordStore, target: LetterGrade) -> Vec<GradeMatch<'_>> {
    store
        .iter()
        .flat_map(|record| {
            record
                .grades()
                .iter()
                .filter(move |g| g.letter() == target)
                .map(move |grade| GradeMatch { record, grade })
        })
        .collect()
}
