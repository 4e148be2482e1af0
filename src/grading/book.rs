//! Grade operations on a single student record.
//!
//! Every successful mutation recomputes the record's GPA before returning, and
//! every failed call leaves the grade list exactly as it was.

use super::rules::{is_valid_credit, is_valid_score, weighted_gpa};
use crate::core::types::clean_field;
use crate::core::{
    GradeDistribution, GradebookError, Result, StudentRecord, SubjectGrade, MAX_SUBJECTS,
    MAX_SUBJECT_LEN,
};

impl StudentRecord {
    /// Append a grade for a new subject.
    ///
    /// Checks, in order: subject limit, score range, credit range, duplicate
    /// subject.
    pub fn add_grade(&mut self, subject: &str, score: f64, credit: i32) -> Result<()> {
        if self.grades.len() >= MAX_SUBJECTS {
            return Err(GradebookError::TooManySubjects { max: MAX_SUBJECTS });
        }
        if !is_valid_score(score) {
            return Err(GradebookError::InvalidScore { score });
        }
        if !is_valid_credit(credit) {
            return Err(GradebookError::InvalidCredit { credit });
        }
        let stored_name = clean_field(subject, MAX_SUBJECT_LEN);
        if self.find_grade(&stored_name).is_some() {
            return Err(GradebookError::DuplicateSubject {
                subject: stored_name,
            });
        }

        self.grades.push(SubjectGrade::new(&stored_name, score, credit));
        self.recompute_gpa();
        Ok(())
    }

    /// Overwrite the score of an existing subject
    pub fn update_grade(&mut self, subject: &str, new_score: f64) -> Result<()> {
        if !is_valid_score(new_score) {
            return Err(GradebookError::InvalidScore { score: new_score });
        }
        let index = self.grade_index(subject)?;
        self.grades[index].set_score(new_score);
        self.recompute_gpa();
        Ok(())
    }

    /// Remove a subject, keeping the order of the remaining grades
    pub fn delete_grade(&mut self, subject: &str) -> Result<SubjectGrade> {
        let index = self.grade_index(subject)?;
        let removed = self.grades.remove(index);
        self.recompute_gpa();
        Ok(removed)
    }

    /// Exact-match lookup on the subject name as it would be stored
    pub fn find_grade(&self, subject: &str) -> Option<&SubjectGrade> {
        let key = clean_field(subject, MAX_SUBJECT_LEN);
        self.grades.iter().find(|g| g.subject() == key)
    }

    fn grade_index(&self, subject: &str) -> Result<usize> {
        let key = clean_field(subject, MAX_SUBJECT_LEN);
        self.grades
            .iter()
            .position(|g| g.subject() == key)
            .ok_or_else(|| GradebookError::SubjectNotFound {
                subject: subject.to_string(),
            })
    }

    pub fn total_credits(&self) -> i32 {
        self.grades.iter().map(SubjectGrade::credit).sum()
    }

    /// Unweighted mean score, 0.0 when there are no grades
    pub fn average_score(&self) -> f64 {
        if self.grades.is_empty() {
            return 0.0;
        }
        let total: f64 = self.grades.iter().map(SubjectGrade::score).sum();
        total / self.grades.len() as f64
    }

    pub fn grade_distribution(&self) -> GradeDistribution {
        self.grades.iter().map(SubjectGrade::letter).collect()
    }

    /// Append a grade read from a data file without re-validating it.
    /// Returns false once the subject limit is reached.
    pub(crate) fn push_loaded_grade(&mut self, grade: SubjectGrade) -> bool {
        if self.grades.len() >= MAX_SUBJECTS {
            return false;
        }
        self.grades.push(grade);
        true
    }

    pub(crate) fn recompute_gpa(&mut self) {
        self.gpa = weighted_gpa(self.grades.iter().map(|g| (g.score(), g.credit())));
    }
}
