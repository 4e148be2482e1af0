//! Pure grade rules: score bands, range checks and the weighted GPA.

use crate::core::LetterGrade;

/// Factor mapping a 0-100 weighted average onto the 0-4.5 GPA scale
pub const GPA_SCALE: f64 = 0.045;
/// Highest reachable GPA
pub const MAX_GPA: f64 = 4.5;

/// Map a score to its letter band. Each band includes its lower bound.
pub fn score_to_grade(score: f64) -> LetterGrade {
    if score >= 90.0 {
        LetterGrade::A
    } else if score >= 80.0 {
        LetterGrade::B
    } else if score >= 70.0 {
        LetterGrade::C
    } else if score >= 60.0 {
        LetterGrade::D
    } else {
        LetterGrade::F
    }
}

pub fn is_valid_score(score: f64) -> bool {
    (0.0..=100.0).contains(&score)
}

pub fn is_valid_credit(credit: i32) -> bool {
    (1..=4).contains(&credit)
}

/// Credit-weighted average score rescaled to 0-4.5.
///
/// Returns 0.0 for no grades. No rounding is applied.
pub fn weighted_gpa<I>(grades: I) -> f64
where
    I: IntoIterator<Item = (f64, i32)>,
{
    let (weighted_sum, total_credits) = grades
        .into_iter()
        .fold((0.0_f64, 0.0_f64), |(sum, credits), (score, credit)| {
            let credit = f64::from(credit);
            (sum + score * credit, credits + credit)
        });

    if total_credits == 0.0 {
        return 0.0;
    }

    (weighted_sum / total_credits) * GPA_SCALE
}
