//! Student command handlers.

use tabled::Tabled;

use campus_core::filter::StudentFilter;
use campus_core::lookup::{self, LookupIndex};
use campus_core::{NewStudent, Portal, Student, StudentUpdate};

use crate::cli::{GlobalOpts, StudentsArgs, StudentsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct StudentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Batch")]
    batch: String,
}

fn row(student: &Student, batches: &LookupIndex<campus_core::Batch>) -> StudentRow {
    StudentRow {
        id: student.id.to_string(),
        name: student.full_name(),
        email: student.email.clone(),
        phone: student.phone.clone(),
        batch: student
            .batch_id
            .map_or_else(|| "-".into(), |id| lookup::batch_name(batches, id)),
    }
}

fn detail(student: &Student) -> String {
    let mut lines = vec![
        format!("ID:        {}", student.id),
        format!("Name:      {}", student.full_name()),
        format!("Email:     {}", student.email),
        format!("Phone:     {}", student.phone),
    ];
    if let Some(batch_id) = student.batch_id {
        lines.push(format!("Batch:     {batch_id}"));
    }
    if let Some(joined) = student.joined_on {
        lines.push(format!("Joined:    {joined}"));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    portal: &Portal,
    args: StudentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        StudentsCommand::List { search, batch } => {
            let mut students_handle = portal.students();
            let mut batches_handle = portal.batches();
            let students = util::fetch(&mut students_handle, global).await?;
            let batches = util::fetch(&mut batches_handle, global).await?;
            let index = LookupIndex::build(&batches);

            let mut filters = Vec::new();
            if let Some(term) = search {
                filters.push(StudentFilter::Search(term));
            }
            if let Some(batch_id) = batch {
                filters.push(StudentFilter::ByBatch(batch_id));
            }

            let visible: Vec<&Student> = students
                .iter()
                .filter(|s| filters.iter().all(|f| f.matches(s)))
                .collect();

            let out = output::render_list(
                &global.output,
                &visible,
                |s| row(s, &index),
                |s| s.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StudentsCommand::Show { id } => {
            let mut students_handle = portal.students();
            let students = util::fetch(&mut students_handle, global).await?;
            let Some(student) = students.iter().find(|s| s.id == id) else {
                return Err(CliError::NotFound {
                    resource_type: "student".into(),
                    identifier: id.to_string(),
                    list_command: "students list".into(),
                });
            };
            let out =
                output::render_single(&global.output, student, detail, |s| s.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StudentsCommand::Add {
            first_name,
            last_name,
            email,
            phone,
            batch,
            joined_on,
        } => {
            let joined_on = util::parse_opt_date(joined_on.as_deref(), "joined-on")?;
            let created = portal
                .create_student(NewStudent {
                    first_name,
                    last_name,
                    email,
                    phone,
                    batch_id: batch,
                    joined_on,
                })
                .await?;
            util::notify(
                &format!("Student added: {} (id {})", created.full_name(), created.id),
                global.quiet,
            );
            Ok(())
        }

        StudentsCommand::Update {
            id,
            first_name,
            last_name,
            email,
            phone,
            batch,
        } => {
            let update = StudentUpdate {
                first_name,
                last_name,
                email,
                phone,
                batch_id: batch,
            };
            let updated = portal.update_student(id, update).await?;
            util::notify(&format!("Student {} updated", updated.id), global.quiet);
            Ok(())
        }

        StudentsCommand::Rm { id } => {
            if !util::confirm(
                &format!("Remove student {id}? This cannot be undone."),
                global.yes,
            )? {
                return Ok(());
            }
            portal.delete_student(id).await?;
            util::notify("Student removed", global.quiet);
            Ok(())
        }
    }
}
