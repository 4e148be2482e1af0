use super::Session;
use crate::analytics::{
    class_statistics, gpa_range, rank_by_gpa, students_with_grade, subject_statistics,
    ClassStatistics, GpaBand, GradeMatch, RankedRecord, SubjectStatistics,
};
use crate::cli::{OutputFormat, ReportCommand};
use crate::core::{LetterGrade, StudentRecord};
use crate::formatting::Formatter;
use crate::grading::MAX_GPA;
use anyhow::Result;
use serde::Serialize;

pub fn handle_report(session: &Session, format: OutputFormat, command: ReportCommand) -> Result<()> {
    let store = session.store();
    let fmt = session.formatter();

    let output = match command {
        ReportCommand::Ranking => {
            let ranked = rank_by_gpa(store);
            emit(format, &ranked, || render_ranking(&ranked, fmt))?
        }
        ReportCommand::Stats => {
            let stats = class_statistics(store);
            emit(format, &stats, || render_class_statistics(&stats, fmt))?
        }
        ReportCommand::Subject { subject } => {
            let stats = subject_statistics(store, &subject);
            emit(format, &stats, || render_subject_statistics(&stats, fmt))?
        }
        ReportCommand::GpaRange { min, max } => {
            let (min, max) = clamp_gpa_range(min, max)?;
            let matches = gpa_range(store, min, max);
            emit(format, &matches, || render_gpa_range(&matches, min, max, fmt))?
        }
        ReportCommand::Grade { letter } => {
            let matches = students_with_grade(store, letter);
            emit(format, &matches, || render_grade_matches(&matches, letter, fmt))?
        }
    };

    print!("{}", output);
    Ok(())
}

fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    terminal: impl FnOnce() -> String,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(value)?)),
        OutputFormat::Terminal => Ok(terminal()),
    }
}

/// Clamp the bounds into `0.0..=4.5` and reject an inverted range
pub(crate) fn clamp_gpa_range(min: f64, max: f64) -> Result<(f64, f64)> {
    if min.is_nan() || max.is_nan() {
        anyhow::bail!("GPA bounds must be numbers");
    }
    let min = min.max(0.0);
    let max = max.min(MAX_GPA);
    if min > max {
        anyhow::bail!(
            "Minimum GPA {:.2} is greater than maximum GPA {:.2}",
            min,
            max
        );
    }
    Ok((min, max))
}

fn optional_gpa(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v))
}

pub(crate) fn render_ranking(ranked: &[RankedRecord<'_>], fmt: &Formatter) -> String {
    if ranked.is_empty() {
        return format!("{}\n", fmt.dim("No students registered"));
    }

    let mut out = format!(
        "{}\n",
        fmt.header(&format!("{:<6} {:<8} {:<20} {:<20} GPA", "Rank", "ID", "Name", "Major"))
    );
    for entry in ranked {
        let identity = entry.record.identity();
        out.push_str(&format!(
            "{:<6} {:<8} {:<20} {:<20} {}\n",
            entry.rank,
            identity.id(),
            identity.name(),
            identity.major(),
            fmt.gpa(entry.record.gpa())
        ));
    }
    out
}

pub(crate) fn render_class_statistics(stats: &ClassStatistics<'_>, fmt: &Formatter) -> String {
    let mut out = format!("{}\n", fmt.header("Class statistics"));
    out.push_str(&format!("Students:        {}\n", stats.total_students));
    out.push_str(&format!("With grades:     {}\n", stats.graded_students));
    out.push_str(&format!("Average GPA:     {}\n", optional_gpa(stats.average_gpa)));
    out.push_str(&format!("Highest GPA:     {}\n", optional_gpa(stats.highest_gpa)));
    out.push_str(&format!("Lowest GPA:      {}\n", optional_gpa(stats.lowest_gpa)));
    if let Some(top) = stats.top_student {
        out.push_str(&format!(
            "Top student:     {} ({}) {}\n",
            top.name(),
            top.id(),
            fmt.gpa(top.gpa())
        ));
    }

    out.push_str(&format!("{}\n", fmt.bold("GPA distribution")));
    for band in GpaBand::ALL {
        out.push_str(&format!(
            "  {:<12} {}\n",
            band.label(),
            stats.distribution.count(band)
        ));
    }
    out
}

pub(crate) fn render_subject_statistics(stats: &SubjectStatistics, fmt: &Formatter) -> String {
    let mut out = format!(
        "{}\n",
        fmt.header(&format!("Subject statistics: {}", stats.subject))
    );
    if stats.count == 0 {
        out.push_str(&format!("{}\n", fmt.dim("No students have taken this subject")));
        return out;
    }

    let score = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{:.1}", v));
    out.push_str(&format!("Students:      {}\n", stats.count));
    out.push_str(&format!("Average score: {}\n", score(stats.average_score)));
    out.push_str(&format!("Highest score: {}\n", score(stats.highest_score)));
    out.push_str(&format!("Lowest score:  {}\n", score(stats.lowest_score)));

    out.push_str(&format!("{}\n", fmt.bold("Grade distribution")));
    for letter in LetterGrade::ALL {
        out.push_str(&format!(
            "  {}: {}\n",
            fmt.letter(letter),
            stats.distribution.count(letter)
        ));
    }
    out
}

pub(crate) fn render_gpa_range(
    matches: &[&StudentRecord],
    min: f64,
    max: f64,
    fmt: &Formatter,
) -> String {
    let mut out = format!(
        "{}\n",
        fmt.header(&format!("Students with GPA {:.2} - {:.2}", min, max))
    );
    if matches.is_empty() {
        out.push_str(&format!("{}\n", fmt.dim("No students in this range")));
        return out;
    }
    for record in matches {
        out.push_str(&format!(
            "{:<8} {:<20} {:<20} {}\n",
            record.id(),
            record.name(),
            record.identity().major(),
            fmt.gpa(record.gpa())
        ));
    }
    out.push_str(&format!("{} student(s)\n", matches.len()));
    out
}

pub(crate) fn render_grade_matches(
    matches: &[GradeMatch<'_>],
    letter: LetterGrade,
    fmt: &Formatter,
) -> String {
    let mut out = format!("{}\n", fmt.header(&format!("Grades of {}", letter)));
    if matches.is_empty() {
        out.push_str(&format!("{}\n", fmt.dim("No matching grades")));
        return out;
    }
    for m in matches {
        out.push_str(&format!(
            "{:<8} {:<20} {:<24} {:>6.1}\n",
            m.record.id(),
            m.record.name(),
            m.grade.subject(),
            m.grade.score()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::FormattingConfig;
    use crate::store::RecordStore;

    fn plain() -> Formatter {
        Formatter::new(FormattingConfig::plain())
    }

    fn class() -> RecordStore {
        let mut store = RecordStore::default();
        store.add(1, "Kang", "CS", "2024-03-02").unwrap();
        store.add(2, "Seo", "CS", "2024-03-02").unwrap();
        store.add(3, "Jung", "Math", "2024-03-02").unwrap();
        store.record_mut(1).unwrap().add_grade("Math", 70.0, 3).unwrap();
        store.record_mut(2).unwrap().add_grade("Math", 92.0, 3).unwrap();
        store
    }

    #[test]
    fn test_clamp_gpa_range() {
        assert_eq!(clamp_gpa_range(-1.0, 9.0).unwrap(), (0.0, 4.5));
        assert_eq!(clamp_gpa_range(2.0, 3.0).unwrap(), (2.0, 3.0));
        assert!(clamp_gpa_range(3.5, 2.0).is_err());
        assert!(clamp_gpa_range(5.0, 6.0).is_err());
        assert!(clamp_gpa_range(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_render_ranking_orders_by_gpa() {
        let store = class();
        let out = render_ranking(&rank_by_gpa(&store), &plain());
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].starts_with("1      2"));
        assert!(lines[2].starts_with("2      1"));
        assert!(lines[3].starts_with("3      3"));
    }

    #[test]
    fn test_render_stats_skips_ungraded_students() {
        let store = class();
        let out = render_class_statistics(&class_statistics(&store), &plain());
        assert!(out.contains("Students:        3"));
        assert!(out.contains("With grades:     2"));
        assert!(out.contains("Lowest GPA:      3.15"));
        assert!(out.contains("Top student:     Seo (2)"));
    }

    #[test]
    fn test_render_empty_subject() {
        let store = class();
        let out = render_subject_statistics(&subject_statistics(&store, "Art"), &plain());
        assert!(out.contains("No students have taken this subject"));
    }

    #[test]
    fn test_json_ranking() {
        let store = class();
        let ranked = rank_by_gpa(&store);
        let json = emit(OutputFormat::Json, &ranked, || unreachable!()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["rank"], 1);
        assert_eq!(value[0]["record"]["identity"]["id"], 2);
    }
}
