use super::Session;
use crate::cli::GradeCommand;
use crate::core::{GradebookError, LetterGrade, StudentRecord};
use crate::formatting::Formatter;
use anyhow::Result;

pub fn handle_grade(session: &mut Session, command: GradeCommand) -> Result<()> {
    let message = match command {
        GradeCommand::Add {
            id,
            subject,
            score,
            credit,
        } => {
            let record = session.store_mut().record_mut(id)?;
            record.add_grade(&subject, score, credit)?;
            format!(
                "Added {} ({:.1}) for student {}, GPA now {:.2}",
                subject,
                score,
                id,
                record.gpa()
            )
        }
        GradeCommand::Update { id, subject, score } => {
            let record = session.store_mut().record_mut(id)?;
            record.update_grade(&subject, score)?;
            format!(
                "Updated {} to {:.1} for student {}, GPA now {:.2}",
                subject,
                score,
                id,
                record.gpa()
            )
        }
        GradeCommand::Remove { id, subject } => {
            let record = session.store_mut().record_mut(id)?;
            let removed = record.delete_grade(&subject)?;
            format!(
                "Removed {} from student {}, GPA now {:.2}",
                removed.subject(),
                id,
                record.gpa()
            )
        }
        GradeCommand::Show { id } => {
            let record = session
                .store()
                .find_by_id(id)
                .ok_or(GradebookError::StudentNotFound { id })?;
            print!("{}", render_transcript(record, session.formatter()));
            return Ok(());
        }
    };

    session.save()?;
    println!("{}", session.formatter().success(&message));
    Ok(())
}

pub(crate) fn render_transcript(record: &StudentRecord, fmt: &Formatter) -> String {
    let identity = record.identity();
    let mut out = format!(
        "{}\n",
        fmt.header(&format!(
            "Transcript: {} ({})",
            identity.name(),
            identity.id()
        ))
    );
    out.push_str(&format!(
        "Major: {}  Registered: {}\n",
        identity.major(),
        identity.registration_date()
    ));

    if !record.has_grades() {
        out.push_str(&format!("{}\n", fmt.dim("No grades recorded")));
        return out;
    }

    out.push_str(&format!(
        "{}\n",
        fmt.bold(&format!("{:<24} {:>6} {:>6}  Grade", "Subject", "Score", "Credit"))
    ));
    for grade in record.grades() {
        out.push_str(&format!(
            "{:<24} {:>6.1} {:>6}  {}\n",
            grade.subject(),
            grade.score(),
            grade.credit(),
            fmt.letter(grade.letter())
        ));
    }

    let distribution = record.grade_distribution();
    let counts: Vec<String> = LetterGrade::ALL
        .iter()
        .map(|letter| format!("{}:{}", letter, distribution.count(*letter)))
        .collect();

    out.push_str(&format!("Total credits: {}\n", record.total_credits()));
    out.push_str(&format!("Average score: {:.2}\n", record.average_score()));
    out.push_str(&format!("GPA:           {}\n", fmt.gpa(record.gpa())));
    out.push_str(&format!("Grades:        {}\n", counts.join(" ")));
    out
}
