//! Teacher command handlers.

use tabled::Tabled;

use campus_core::filter::TeacherFilter;
use campus_core::{NewTeacher, Portal, Teacher, TeacherUpdate};

use crate::cli::{GlobalOpts, TeachersArgs, TeachersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct TeacherRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Subject")]
    subject: String,
}

impl From<&&Teacher> for TeacherRow {
    fn from(teacher: &&Teacher) -> Self {
        Self {
            id: teacher.id.to_string(),
            name: teacher.full_name(),
            email: teacher.email.clone(),
            phone: teacher.phone.clone(),
            subject: teacher.subject.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

pub async fn handle(
    portal: &Portal,
    args: TeachersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TeachersCommand::List { search, subject } => {
            let mut handle = portal.teachers();
            let teachers = util::fetch(&mut handle, global).await?;

            let mut filters = Vec::new();
            if let Some(term) = search {
                filters.push(TeacherFilter::Search(term));
            }
            if let Some(subject) = subject {
                filters.push(TeacherFilter::BySubject(subject));
            }

            let visible: Vec<&Teacher> = teachers
                .iter()
                .filter(|t| filters.iter().all(|f| f.matches(t)))
                .collect();

            let out = output::render_list(
                &global.output,
                &visible,
                |t| TeacherRow::from(t),
                |t| t.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TeachersCommand::Add {
            first_name,
            last_name,
            email,
            phone,
            subject,
        } => {
            let created = portal
                .create_teacher(NewTeacher {
                    first_name,
                    last_name,
                    email,
                    phone,
                    subject,
                })
                .await?;
            util::notify(
                &format!("Teacher added: {} (id {})", created.full_name(), created.id),
                global.quiet,
            );
            Ok(())
        }

        TeachersCommand::Update {
            id,
            first_name,
            last_name,
            email,
            phone,
            subject,
        } => {
            let update = TeacherUpdate {
                first_name,
                last_name,
                email,
                phone,
                subject,
            };
            let updated = portal.update_teacher(id, update).await?;
            util::notify(&format!("Teacher {} updated", updated.id), global.quiet);
            Ok(())
        }

        TeachersCommand::Rm { id } => {
            if !util::confirm(
                &format!("Remove teacher {id}? This cannot be undone."),
                global.yes,
            )? {
                return Ok(());
            }
            portal.delete_teacher(id).await?;
            util::notify("Teacher removed", global.quiet);
            Ok(())
        }
    }
}
