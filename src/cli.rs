use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::LetterGrade;

#[derive(Parser, Debug)]
#[command(name = "gradebook")]
#[command(about = "Student records, grades and GPA analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data file to load and save (overrides the configured path)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Configuration file (defaults to the nearest .gradebook.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,

    /// Save even when the data file loaded with skipped or damaged lines,
    /// dropping those lines from the file
    #[arg(long, global = true)]
    pub allow_lossy_save: bool,

    /// Increase verbosity level (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new .gradebook.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Add, remove, show, update and list students
    Student {
        #[command(subcommand)]
        command: StudentCommand,
    },

    /// Manage the subject grades of one student
    Grade {
        #[command(subcommand)]
        command: GradeCommand,
    },

    /// Rankings, statistics and queries over the whole class
    Report {
        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal", global = true)]
        format: OutputFormat,

        #[command(subcommand)]
        command: ReportCommand,
    },

    /// Export, import, back up and restore data files
    File {
        #[command(subcommand)]
        command: FileCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum StudentCommand {
    /// Register a new student
    Add {
        #[arg(allow_negative_numbers = true)]
        id: i32,
        #[arg(value_parser = parse_text_field)]
        name: String,
        #[arg(value_parser = parse_text_field)]
        major: String,

        /// Registration date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_text_field)]
        reg_date: Option<String>,
    },

    /// Delete a student and all of their grades
    Remove {
        #[arg(allow_negative_numbers = true)]
        id: i32,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Show one student, looked up by id or by name
    Show {
        #[arg(long, conflicts_with = "name", required_unless_present = "name")]
        id: Option<i32>,

        /// Exact name; the first match in store order is shown
        #[arg(long)]
        name: Option<String>,
    },

    /// Change name, major or registration date
    Update {
        #[arg(allow_negative_numbers = true)]
        id: i32,

        #[arg(long, value_parser = parse_text_field)]
        name: Option<String>,

        #[arg(long, value_parser = parse_text_field)]
        major: Option<String>,

        #[arg(long, value_parser = parse_text_field)]
        reg_date: Option<String>,
    },

    /// List all students
    List {
        /// Reorder the stored records before listing
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
    },
}

#[derive(Subcommand, Debug)]
pub enum GradeCommand {
    /// Record a new subject grade
    Add {
        #[arg(allow_negative_numbers = true)]
        id: i32,
        #[arg(value_parser = parse_subject)]
        subject: String,
        #[arg(allow_negative_numbers = true)]
        score: f64,
        #[arg(allow_negative_numbers = true)]
        credit: i32,
    },

    /// Change the score of an existing subject
    Update {
        #[arg(allow_negative_numbers = true)]
        id: i32,
        #[arg(value_parser = parse_subject)]
        subject: String,
        #[arg(allow_negative_numbers = true)]
        score: f64,
    },

    /// Delete a subject grade
    Remove {
        #[arg(allow_negative_numbers = true)]
        id: i32,
        #[arg(value_parser = parse_subject)]
        subject: String,
    },

    /// Print a student's transcript
    Show {
        #[arg(allow_negative_numbers = true)]
        id: i32,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Students ordered by GPA with competition ranks
    Ranking,

    /// Class-wide GPA statistics
    Stats,

    /// Score statistics for one subject
    Subject { subject: String },

    /// Students whose GPA lies within MIN..=MAX
    GpaRange {
        #[arg(allow_negative_numbers = true)]
        min: f64,
        #[arg(allow_negative_numbers = true)]
        max: f64,
    },

    /// Every grade entry with exactly this letter
    Grade {
        #[arg(value_parser = parse_letter)]
        letter: LetterGrade,
    },
}

#[derive(Subcommand, Debug)]
pub enum FileCommand {
    /// Save the current records to another file
    Export { path: PathBuf },

    /// Merge records from another file, skipping known ids
    Import { path: PathBuf },

    /// Copy the data file to the backup file
    Backup,

    /// Replace the data file contents with the backup
    Restore {
        /// Confirm replacing all current records
        #[arg(long)]
        yes: bool,
    },

    /// Check that a file starts with a recognizable header
    Check { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Id,
    Name,
    Gpa,
}

/// Reject subject names that would break the data file's delimiters
pub fn parse_subject(value: &str) -> Result<String, String> {
    let value = parse_text_field(value)?;
    if value.is_empty() {
        return Err("subject name must not be empty".to_string());
    }
    match value.chars().find(|c| matches!(c, ';' | ':' | '"')) {
        Some(c) => Err(format!("subject name must not contain '{}'", c)),
        None => Ok(value),
    }
}

/// Names, majors and dates end up as comma-separated fields on one line.
///
/// Surrounding whitespace is dropped since the loader trims every field.
pub fn parse_text_field(value: &str) -> Result<String, String> {
    if value.contains(',') {
        return Err("value must not contain ','".to_string());
    }
    if value.chars().any(char::is_control) {
        return Err("value must not contain line breaks or control characters".to_string());
    }
    Ok(value.trim().to_string())
}

fn parse_letter(value: &str) -> Result<LetterGrade, String> {
    value.to_uppercase().parse()
}
