use super::Session;
use crate::cli::{SortKey, StudentCommand};
use crate::core::{GradebookError, StudentRecord};
use crate::formatting::Formatter;
use crate::store::{InfoUpdate, RecordStore};
use anyhow::Result;

pub fn handle_student(session: &mut Session, command: StudentCommand) -> Result<()> {
    match command {
        StudentCommand::Add {
            id,
            name,
            major,
            reg_date,
        } => {
            let reg_date = reg_date.unwrap_or_else(today);
            session.store_mut().add(id, &name, &major, &reg_date)?;
            session.save()?;
            println!(
                "{}",
                session
                    .formatter()
                    .success(&format!("Added student {} ({})", id, name))
            );
        }
        StudentCommand::Remove { id, yes } => {
            if !yes {
                anyhow::bail!("Removing student {} deletes all of their grades. Re-run with --yes to confirm.", id);
            }
            let removed = session.store_mut().delete(id)?;
            session.save()?;
            println!(
                "{}",
                session
                    .formatter()
                    .success(&format!("Removed student {} ({})", id, removed.name()))
            );
        }
        StudentCommand::Show { id, name } => {
            let store = session.store();
            let record = match (id, name.as_deref()) {
                (Some(id), _) => store
                    .find_by_id(id)
                    .ok_or(GradebookError::StudentNotFound { id })?,
                (None, Some(name)) => store
                    .find_by_name(name)
                    .ok_or_else(|| anyhow::anyhow!("No student named '{}'", name))?,
                (None, None) => anyhow::bail!("Either --id or --name is required"),
            };
            print!("{}", render_student(record, session.formatter()));
        }
        StudentCommand::Update {
            id,
            name,
            major,
            reg_date,
        } => {
            let update = InfoUpdate {
                name: name.as_deref(),
                major: major.as_deref(),
                registration_date: reg_date.as_deref(),
            };
            session.store_mut().update_info(id, update)?;
            session.save()?;
            println!(
                "{}",
                session
                    .formatter()
                    .success(&format!("Updated student {}", id))
            );
        }
        StudentCommand::List { sort } => {
            if let Some(key) = sort {
                sort_store(session.store_mut(), key);
                session.save()?;
            }
            print!("{}", render_list(session.store(), session.formatter()));
        }
    }
    Ok(())
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn sort_store(store: &mut RecordStore, key: SortKey) {
    match key {
        SortKey::Id => store.sort_by_id(),
        SortKey::Name => store.sort_by_name(),
        SortKey::Gpa => store.sort_by_gpa(),
    }
}

pub(crate) fn render_student(record: &StudentRecord, fmt: &Formatter) -> String {
    let identity = record.identity();
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        fmt.header(&format!("Student {}", identity.id()))
    ));
    out.push_str(&format!("  Name:       {}\n", identity.name()));
    out.push_str(&format!("  Major:      {}\n", identity.major()));
    out.push_str(&format!("  Registered: {}\n", identity.registration_date()));
    out.push_str(&format!("  Subjects:   {}\n", record.subject_count()));
    out.push_str(&format!("  GPA:        {}\n", fmt.gpa(record.gpa())));
    out
}

pub(crate) fn render_list(store: &RecordStore, fmt: &Formatter) -> String {
    if store.is_empty() {
        return format!("{}\n", fmt.dim("No students registered"));
    }

    let mut out = format!(
        "{}\n",
        fmt.header(&format!(
            "{:<8} {:<20} {:<20} {:<10} {:>8}  GPA",
            "ID", "Name", "Major", "Reg Date", "Subjects"
        ))
    );
    for record in store {
        let identity = record.identity();
        out.push_str(&format!(
            "{:<8} {:<20} {:<20} {:<10} {:>8}  {}\n",
            identity.id(),
            identity.name(),
            identity.major(),
            identity.registration_date(),
            record.subject_count(),
            fmt.gpa(record.gpa())
        ));
    }
    out.push_str(&format!(
        "{}\n",
        fmt.dim(&format!("{} of {} records", store.len(), store.capacity()))
    ));
    out
}
