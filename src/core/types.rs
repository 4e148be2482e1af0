use serde::Serialize;
use std::fmt;

/// Maximum characters kept for a student name
pub const MAX_NAME_LEN: usize = 49;
/// Maximum characters kept for a major
pub const MAX_MAJOR_LEN: usize = 49;
/// Maximum characters kept for a subject name
pub const MAX_SUBJECT_LEN: usize = 49;
/// Maximum characters kept for a registration date (`YYYY-MM-DD`)
pub const MAX_REG_DATE_LEN: usize = 10;
/// Maximum number of subjects per record
pub const MAX_SUBJECTS: usize = 10;

/// Letter grade derived from a numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    /// All grades from best to worst
    pub const ALL: [LetterGrade; 5] = [Self::A, Self::B, Self::C, Self::D, Self::F];

    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::F => 'F',
        }
    }

    /// Parse a single letter, case-insensitive
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'F' => Some(Self::F),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
            Self::F => 4,
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl std::str::FromStr for LetterGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_char(c).ok_or_else(|| format!("invalid letter grade '{}'", s))
            }
            _ => Err(format!("invalid letter grade '{}'", s)),
        }
    }
}

/// Count of grades per letter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GradeDistribution {
    counts: [usize; 5],
}

impl GradeDistribution {
    pub fn record(&mut self, letter: LetterGrade) {
        self.counts[letter.index()] += 1;
    }

    pub fn count(&self, letter: LetterGrade) -> usize {
        self.counts[letter.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl FromIterator<LetterGrade> for GradeDistribution {
    fn from_iter<I: IntoIterator<Item = LetterGrade>>(iter: I) -> Self {
        let mut distribution = Self::default();
        for letter in iter {
            distribution.record(letter);
        }
        distribution
    }
}

/// Keep at most `max` characters of `value`
pub(crate) fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((end, _)) => value[..end].to_string(),
        None => value.to_string(),
    }
}

/// Normalize a stored text field so it survives a save and load unchanged.
///
/// Control characters (line breaks included) become spaces, surrounding
/// whitespace is dropped, and the result is cut to `max` characters.
pub(crate) fn clean_field(value: &str, max: usize) -> String {
    let replaced: String = value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    truncate_chars(replaced.trim(), max).trim_end().to_string()
}

/// Student identity. The id never changes once a record exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    id: i32,
    name: String,
    major: String,
    registration_date: String,
}

impl Identity {
    /// Build an identity, normalizing each text field with its maximum length
    pub fn new(id: i32, name: &str, major: &str, registration_date: &str) -> Self {
        Self {
            id,
            name: clean_field(name, MAX_NAME_LEN),
            major: clean_field(major, MAX_MAJOR_LEN),
            registration_date: clean_field(registration_date, MAX_REG_DATE_LEN),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn major(&self) -> &str {
        &self.major
    }

    pub fn registration_date(&self) -> &str {
        &self.registration_date
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = clean_field(name, MAX_NAME_LEN);
    }

    pub(crate) fn set_major(&mut self, major: &str) {
        self.major = clean_field(major, MAX_MAJOR_LEN);
    }

    pub(crate) fn set_registration_date(&mut self, date: &str) {
        self.registration_date = clean_field(date, MAX_REG_DATE_LEN);
    }
}

/// One subject entry on a record. The letter grade always matches the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectGrade {
    subject: String,
    score: f64,
    letter: LetterGrade,
    credit: i32,
}

impl SubjectGrade {
    /// Callers validate score and credit first
    pub(crate) fn new(subject: &str, score: f64, credit: i32) -> Self {
        Self {
            subject: clean_field(subject, MAX_SUBJECT_LEN),
            score,
            letter: crate::grading::score_to_grade(score),
            credit,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn letter(&self) -> LetterGrade {
        self.letter
    }

    pub fn credit(&self) -> i32 {
        self.credit
    }

    pub(crate) fn set_score(&mut self, score: f64) {
        self.score = score;
        self.letter = crate::grading::score_to_grade(score);
    }
}

/// One student's identity, grades and computed GPA
///
/// `gpa` always equals `weighted_gpa(grades)`; only the grade operations in
/// [`crate::grading`] mutate the grade list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    pub(crate) identity: Identity,
    pub(crate) grades: Vec<SubjectGrade>,
    pub(crate) gpa: f64,
}

impl StudentRecord {
    /// New record with no grades and a GPA of 0.0
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            grades: Vec::new(),
            gpa: 0.0,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn id(&self) -> i32 {
        self.identity.id
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn grades(&self) -> &[SubjectGrade] {
        &self.grades
    }

    pub fn gpa(&self) -> f64 {
        self.gpa
    }

    pub fn subject_count(&self) -> usize {
        self.grades.len()
    }

    pub fn has_grades(&self) -> bool {
        !self.grades.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("김철수입니다", 3), "김철수");
    }

    #[test]
    fn test_clean_field_removes_line_breaks_and_edges() {
        assert_eq!(clean_field("Kim\n999", 49), "Kim 999");
        assert_eq!(clean_field("  Math\r\n", 49), "Math");
        assert_eq!(clean_field("ab cd", 3), "ab");
        assert_eq!(clean_field("\t", 49), "");
    }

    #[test]
    fn test_identity_truncates_fields() {
        let long = "x".repeat(80);
        let identity = Identity::new(1, &long, &long, "2024-03-01T09:00");
        assert_eq!(identity.name().len(), MAX_NAME_LEN);
        assert_eq!(identity.major().len(), MAX_MAJOR_LEN);
        assert_eq!(identity.registration_date(), "2024-03-01");
    }

    #[test]
    fn test_subject_grade_letter_follows_score() {
        let mut grade = SubjectGrade::new("Math", 91.0, 3);
        assert_eq!(grade.letter(), LetterGrade::A);
        grade.set_score(59.9);
        assert_eq!(grade.letter(), LetterGrade::F);
    }

    #[test]
    fn test_letter_grade_parsing() {
        assert_eq!("b".parse::<LetterGrade>(), Ok(LetterGrade::B));
        assert_eq!(" F ".parse::<LetterGrade>(), Ok(LetterGrade::F));
        assert!("E".parse::<LetterGrade>().is_err());
        assert!("AB".parse::<LetterGrade>().is_err());
    }

    #[test]
    fn test_distribution_counts() {
        let distribution: GradeDistribution =
            [LetterGrade::A, LetterGrade::A, LetterGrade::F].into_iter().collect();
        assert_eq!(distribution.count(LetterGrade::A), 2);
        assert_eq!(distribution.count(LetterGrade::B), 0);
        assert_eq!(distribution.count(LetterGrade::F), 1);
        assert_eq!(distribution.total(), 3);
    }

    #[test]
    fn test_new_record_is_empty() {
        let record = StudentRecord::new(Identity::new(3, "Lee", "Physics", "2024-01-02"));
        assert_eq!(record.gpa(), 0.0);
        assert!(!record.has_grades());
        assert_eq!(record.id(), 3);
    }
}
