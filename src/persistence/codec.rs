//! Text format for the record store.
//!
//! ```text
//! ID,Name,Major,Reg_Date,Grades
//! 2024001,Kim,Computer Science,2024-03-01,"Math:95.0:3;English:82.5:2"
//! 2024002,Lee,Physics,2024-03-02,
//! ```
//!
//! The grade field is a quoted `subject:score:credit` list separated by `;`,
//! or empty when the record has no grades. Scores carry one fractional digit.
//! There is no escaping, so text fields must not contain `,` and subjects
//! must not contain `;`, `:` or `"`.

use crate::core::{Identity, StudentRecord, SubjectGrade};
use crate::grading::{is_valid_credit, is_valid_score};
use crate::store::RecordStore;
use std::fmt::Write as _;
use tracing::debug;

/// Header line written to and skipped on every file
pub const HEADER: &str = "ID,Name,Major,Reg_Date,Grades";

const FIELD_DELIMITER: char = ',';
const GRADE_DELIMITER: char = ';';
const TOKEN_DELIMITER: char = ':';
const MAX_FIELDS: usize = 5;
const MIN_FIELDS: usize = 4;

/// Serialize the whole store: header plus one line per record
pub fn serialize_store(store: &RecordStore) -> String {
    let mut out = String::with_capacity(64 * (store.len() + 1));
    out.push_str(HEADER);
    out.push('\n');
    for record in store {
        out.push_str(&format_record(record));
        out.push('\n');
    }
    out
}

/// One data line, without the trailing newline
pub fn format_record(record: &StudentRecord) -> String {
    let identity = record.identity();
    format!(
        "{},{},{},{},{}",
        identity.id(),
        identity.name(),
        identity.major(),
        identity.registration_date(),
        format_grades(record.grades())
    )
}

/// Quoted grade list, or an empty string for no grades
pub fn format_grades(grades: &[SubjectGrade]) -> String {
    if grades.is_empty() {
        return String::new();
    }

    let mut out = String::from("\"");
    for (i, grade) in grades.iter().enumerate() {
        if i > 0 {
            out.push(GRADE_DELIMITER);
        }
        // Writing into a String cannot fail
        let _ = write!(
            out,
            "{}:{:.1}:{}",
            grade.subject(),
            grade.score(),
            grade.credit()
        );
    }
    out.push('"');
    out
}

/// Parse one data line.
///
/// Returns `None` when the line has fewer than four fields. Fields beyond the
/// fifth are ignored.
pub fn parse_record_line(line: &str) -> Option<StudentRecord> {
    let fields: Vec<&str> = line
        .split(FIELD_DELIMITER)
        .take(MAX_FIELDS)
        .map(str::trim)
        .collect();

    if fields.len() < MIN_FIELDS {
        return None;
    }

    let identity = Identity::new(parse_id(fields[0]), fields[1], fields[2], fields[3]);
    let mut record = StudentRecord::new(identity);
    if let Some(grades) = fields.get(4) {
        parse_grades(grades, &mut record);
    }
    Some(record)
}

/// Append every well-formed grade token to `record`, then recompute its GPA
/// once. Malformed tokens are skipped.
pub fn parse_grades(field: &str, record: &mut StudentRecord) {
    let field = field.trim().trim_matches('"');

    for token in field.split(GRADE_DELIMITER).filter(|t| !t.trim().is_empty()) {
        let Some(grade) = parse_grade_token(token) else {
            debug!(token, "skipping malformed grade token");
            continue;
        };
        if record.find_grade(grade.subject()).is_some() {
            debug!(token, "skipping repeated subject");
            continue;
        }
        if !record.push_loaded_grade(grade) {
            debug!(id = record.id(), "subject limit reached, ignoring remaining grades");
            break;
        }
    }

    record.recompute_gpa();
}

/// Parse `subject:score:credit`; out-of-range values count as malformed
pub fn parse_grade_token(token: &str) -> Option<SubjectGrade> {
    let mut parts = token.splitn(3, TOKEN_DELIMITER);
    let subject = parts.next()?.trim();
    let score: f64 = parts.next()?.trim().parse().ok()?;
    let credit: i32 = parts.next()?.trim().parse().ok()?;

    if subject.is_empty() || !is_valid_score(score) || !is_valid_credit(credit) {
        return None;
    }
    Some(SubjectGrade::new(subject, score, credit))
}

/// Lenient integer parse: optional sign and leading digits, anything else
/// (including overflow) reads as 0.
pub fn parse_id(text: &str) -> i32 {
    let text = text.trim();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digits_end = text[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |i| i + sign_len);

    text[..digits_end].parse().unwrap_or(0)
}
