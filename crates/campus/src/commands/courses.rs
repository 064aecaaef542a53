//! Course command handlers.

use tabled::Tabled;

use campus_core::lookup::{self, LookupIndex};
use campus_core::{Course, CourseUpdate, NewCourse, Portal};

use crate::cli::{CoursesArgs, CoursesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct CourseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Teacher")]
    teacher: String,
}

pub async fn handle(
    portal: &Portal,
    args: CoursesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CoursesCommand::List => {
            let mut courses_handle = portal.courses();
            let mut teachers_handle = portal.teachers();
            let courses = util::fetch(&mut courses_handle, global).await?;
            let teachers = util::fetch(&mut teachers_handle, global).await?;
            let index = LookupIndex::build(&teachers);

            let rows: Vec<&Course> = courses.iter().collect();
            let out = output::render_list(
                &global.output,
                &rows,
                |course| CourseRow {
                    id: course.id.to_string(),
                    code: course.code.clone(),
                    name: course.name.clone(),
                    teacher: course
                        .teacher_id
                        .map_or_else(|| "-".into(), |id| lookup::teacher_name(&index, id)),
                },
                |course| course.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CoursesCommand::Add {
            name,
            code,
            description,
            teacher,
        } => {
            let created = portal
                .create_course(NewCourse {
                    name,
                    code,
                    description,
                    teacher_id: teacher,
                })
                .await?;
            util::notify(
                &format!("Course added: {} (id {})", created.code, created.id),
                global.quiet,
            );
            Ok(())
        }

        CoursesCommand::Update {
            id,
            name,
            description,
            teacher,
        } => {
            let update = CourseUpdate {
                name,
                description,
                teacher_id: teacher,
            };
            let updated = portal.update_course(id, update).await?;
            util::notify(&format!("Course {} updated", updated.id), global.quiet);
            Ok(())
        }

        CoursesCommand::Rm { id } => {
            if !util::confirm(
                &format!("Remove course {id}? This cannot be undone."),
                global.yes,
            )? {
                return Ok(());
            }
            portal.delete_course(id).await?;
            util::notify("Course removed", global.quiet);
            Ok(())
        }
    }
}
