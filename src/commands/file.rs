use super::session::report_load_issues;
use super::Session;
use crate::cli::FileCommand;
use crate::core::GradebookError;
use crate::formatting::Formatter;
use crate::persistence::{self, LoadSummary};
use anyhow::{Context, Result};
use std::path::Path;

pub fn handle_file(session: &mut Session, command: FileCommand) -> Result<()> {
    match command {
        FileCommand::Export { path } => {
            let written = persistence::export_to_file(session.store(), &path)
                .with_context(|| format!("Failed to export to {}", path.display()))?;
            println!(
                "{}",
                session.formatter().success(&format!(
                    "Exported {} record(s) to {}",
                    written,
                    path.display()
                ))
            );
        }
        FileCommand::Import { path } => {
            let summary = persistence::import_from_file(session.store_mut(), &path)?;
            report_load_issues(&path, &summary);
            session.save()?;
            print!(
                "{}",
                render_summary("Imported", &summary, session.store().len(), session.formatter())
            );
        }
        FileCommand::Backup => {
            let bytes =
                persistence::create_backup_at(session.data_file(), session.backup_file())?;
            println!(
                "{}",
                session.formatter().success(&format!(
                    "Backed up {} to {} ({} bytes)",
                    session.data_file().display(),
                    session.backup_file().display(),
                    bytes
                ))
            );
        }
        FileCommand::Restore { yes } => {
            if !yes {
                anyhow::bail!(
                    "Restoring replaces every current record. Re-run with --yes to confirm."
                );
            }
            let backup = session.backup_file().to_path_buf();
            let summary = persistence::restore_from(session.store_mut(), &backup)?;
            report_load_issues(&backup, &summary);
            session.replace_contents();
            session.save()?;
            print!(
                "{}",
                render_summary("Restored", &summary, session.store().len(), session.formatter())
            );
        }
        FileCommand::Check { path } => check_file(&path, session.formatter())?,
    }
    Ok(())
}

fn check_file(path: &Path, fmt: &Formatter) -> Result<()> {
    if !persistence::file_exists(path) {
        return Err(GradebookError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    if !persistence::is_valid_format(path) {
        anyhow::bail!(
            "{} does not start with a '{}' header",
            path.display(),
            persistence::HEADER
        );
    }
    println!(
        "{}",
        fmt.success(&format!("{} looks like a gradebook data file", path.display()))
    );
    Ok(())
}

pub(crate) fn render_summary(
    verb: &str,
    summary: &LoadSummary,
    total: usize,
    fmt: &Formatter,
) -> String {
    let mut out = format!(
        "{}\n",
        fmt.success(&format!(
            "{} {} record(s), {} in store",
            verb, summary.loaded, total
        ))
    );
    if summary.skipped_duplicates > 0 {
        out.push_str(&format!(
            "{}\n",
            fmt.warning(&format!(
                "Skipped {} record(s) with an existing id",
                summary.skipped_duplicates
            ))
        ));
    }
    if !summary.rejected_lines.is_empty() {
        let lines: Vec<String> = summary
            .rejected_lines
            .iter()
            .map(|n| n.to_string())
            .collect();
        out.push_str(&format!(
            "{}\n",
            fmt.warning(&format!("Rejected malformed line(s): {}", lines.join(", ")))
        ));
    }
    if summary.stopped_at_capacity {
        out.push_str(&format!(
            "{}\n",
            fmt.warning("Store is full; the rest of the file was not read")
        ));
    }
    if summary.replaced_invalid_utf8 {
        out.push_str(&format!(
            "{}\n",
            fmt.warning("File is not valid UTF-8; invalid bytes were replaced")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::FormattingConfig;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_render_clean_summary() {
        let summary = LoadSummary {
            loaded: 3,
            ..LoadSummary::default()
        };
        let out = render_summary("Imported", &summary, 5, &Formatter::new(FormattingConfig::plain()));
        assert_eq!(out, "Imported 3 record(s), 5 in store\n");
    }

    #[test]
    fn test_render_summary_with_problems() {
        let summary = LoadSummary {
            loaded: 1,
            skipped_duplicates: 2,
            rejected_lines: vec![3, 7],
            stopped_at_capacity: true,
            replaced_invalid_utf8: true,
        };
        let out = render_summary("Restored", &summary, 1, &Formatter::new(FormattingConfig::plain()));
        assert!(out.contains("Skipped 2 record(s) with an existing id"));
        assert!(out.contains("Rejected malformed line(s): 3, 7"));
        assert!(out.contains("Store is full"));
        assert!(out.contains("invalid bytes were replaced"));
    }

    #[test]
    fn test_check_file() {
        let dir = TempDir::new().unwrap();
        let fmt = Formatter::new(FormattingConfig::plain());

        let good = dir.path().join("good.csv");
        std::fs::write(&good, "ID,Name,Major,Reg_Date,Grades\n").unwrap();
        assert!(check_file(&good, &fmt).is_ok());

        let bad = dir.path().join("bad.csv");
        std::fs::write(&bad, "hello\n").unwrap();
        assert!(check_file(&bad, &fmt).is_err());

        assert!(check_file(&dir.path().join("missing.csv"), &fmt).is_err());
    }
}
