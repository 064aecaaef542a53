//! Exam command handlers.

use tabled::Tabled;

use campus_core::lookup::{self, LookupIndex};
use campus_core::{Exam, NewExam, Portal};

use crate::cli::{ExamsArgs, ExamsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ExamRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Max marks")]
    max_marks: String,
}

pub async fn handle(
    portal: &Portal,
    args: ExamsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ExamsCommand::List => {
            let mut exams_handle = portal.exams();
            let mut courses_handle = portal.courses();
            let exams = util::fetch(&mut exams_handle, global).await?;
            let courses = util::fetch(&mut courses_handle, global).await?;
            let index = LookupIndex::build(&courses);

            let rows: Vec<&Exam> = exams.iter().collect();
            let out = output::render_list(
                &global.output,
                &rows,
                |exam| ExamRow {
                    id: exam.id.to_string(),
                    name: exam.name.clone(),
                    course: lookup::course_name(&index, exam.course_id),
                    date: exam.held_on.to_string(),
                    max_marks: exam.max_marks.to_string(),
                },
                |exam| exam.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ExamsCommand::Add {
            course,
            name,
            date,
            max_marks,
        } => {
            let held_on = util::parse_date(&date, "date")?;
            let created = portal
                .create_exam(NewExam {
                    course_id: course,
                    name,
                    held_on,
                    max_marks,
                })
                .await?;
            util::notify(
                &format!("Exam scheduled: {} (id {})", created.name, created.id),
                global.quiet,
            );
            Ok(())
        }

        ExamsCommand::Rm { id } => {
            if !util::confirm(
                &format!("Remove exam {id}? This cannot be undone."),
                global.yes,
            )? {
                return Ok(());
            }
            portal.delete_exam(id).await?;
            util::notify("Exam removed", global.quiet);
            Ok(())
        }
    }
}
