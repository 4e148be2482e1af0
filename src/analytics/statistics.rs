//! Class-wide and per-subject statistics.

use crate::core::{GradeDistribution, StudentRecord, SubjectGrade};
use crate::store::RecordStore;
use serde::Serialize;

/// GPA bucket used by the class distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GpaBand {
    /// 4.0 to 4.5
    Top,
    /// 3.5 up to 4.0
    Upper,
    /// 3.0 up to 3.5
    Middle,
    /// 2.5 up to 3.0
    Lower,
    /// below 2.5
    Bottom,
}

impl GpaBand {
    pub const ALL: [GpaBand; 5] = [Self::Top, Self::Upper, Self::Middle, Self::Lower, Self::Bottom];

    pub fn of(gpa: f64) -> Self {
        if gpa >= 4.0 {
            Self::Top
        } else if gpa >= 3.5 {
            Self::Upper
        } else if gpa >= 3.0 {
            Self::Middle
        } else if gpa >= 2.5 {
            Self::Lower
        } else {
            Self::Bottom
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Top => "4.0 - 4.5",
            Self::Upper => "3.5 - 3.99",
            Self::Middle => "3.0 - 3.49",
            Self::Lower => "2.5 - 2.99",
            Self::Bottom => "below 2.5",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GpaDistribution {
    counts: [usize; 5],
}

impl GpaDistribution {
    pub fn count(&self, band: GpaBand) -> usize {
        self.counts[band.index()]
    }

    fn record(&mut self, gpa: f64) {
        self.counts[GpaBand::of(gpa).index()] += 1;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassStatistics<'a> {
    pub total_students: usize,
    /// Students with at least one grade
    pub graded_students: usize,
    pub average_gpa: Option<f64>,
    pub highest_gpa: Option<f64>,
    pub lowest_gpa: Option<f64>,
    /// Highest GPA over all records, first in store order on ties
    pub top_student: Option<&'a StudentRecord>,
    pub distribution: GpaDistribution,
}

/// Class statistics. Average, extremes and distribution only count graded
/// students.
pub fn class_statistics(store: &RecordStore) -> ClassStatistics<'_> {
    let graded: Vec<f64> = store
        .iter()
        .filter(|r| r.has_grades())
        .map(StudentRecord::gpa)
        .collect();

    let mut distribution = GpaDistribution::default();
    for gpa in &graded {
        distribution.record(*gpa);
    }

    let average_gpa = (!graded.is_empty()).then(|| graded.iter().sum::<f64>() / graded.len() as f64);
    let highest_gpa = graded.iter().copied().reduce(f64::max);
    let lowest_gpa = graded.iter().copied().reduce(f64::min);

    ClassStatistics {
        total_students: store.len(),
        graded_students: graded.len(),
        average_gpa,
        highest_gpa,
        lowest_gpa,
        top_student: top_student(store),
        distribution,
    }
}

/// Record with the highest GPA; the first one wins a tie
pub fn top_student(store: &RecordStore) -> Option<&StudentRecord> {
    store.iter().fold(None, |top: Option<&StudentRecord>, record| match top {
        Some(current) if record.gpa() <= current.gpa() => Some(current),
        _ => Some(record),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectStatistics {
    pub subject: String,
    /// Number of records holding the subject
    pub count: usize,
    pub average_score: Option<f64>,
    pub highest_score: Option<f64>,
    pub lowest_score: Option<f64>,
    pub distribution: GradeDistribution,
}

fn subject_grades<'a>(
    store: &'a RecordStore,
    subject: &'a str,
) -> impl Iterator<Item = &'a SubjectGrade> + 'a {
    store.iter().filter_map(move |r| r.find_grade(subject))
}

/// Statistics over every exact-match grade for `subject`.
///
/// No matches is a valid result with a count of zero.
pub fn subject_statistics(store: &RecordStore, subject: &str) -> SubjectStatistics {
    let grades: Vec<&SubjectGrade> = subject_grades(store, subject).collect();
    let scores: Vec<f64> = grades.iter().map(|g| g.score()).collect();

    SubjectStatistics {
        subject: subject.to_string(),
        count: grades.len(),
        average_score: (!scores.is_empty())
            .then(|| scores.iter().sum::<f64>() / scores.len() as f64),
        highest_score: scores.iter().copied().reduce(f64::max),
        lowest_score: scores.iter().copied().reduce(f64::min),
        distribution: grades.iter().map(|g| g.letter()).collect(),
    }
}

/// Mean score for `subject`, 0.0 when nobody takes it
pub fn subject_average(store: &RecordStore, subject: &str) -> f64 {
    subject_statistics(store, subject).average_score.unwrap_or(0.0)
}

pub fn count_students_with_subject(store: &RecordStore, subject: &str) -> usize {
    subject_grades(store, subject).count()
}
