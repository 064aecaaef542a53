//! Enrollment command handlers.

use tabled::Tabled;

use campus_core::lookup::{self, LookupIndex};
use campus_core::{Enrollment, NewEnrollment, Portal};

use crate::cli::{EnrollmentsArgs, EnrollmentsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct EnrollmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Student")]
    student: String,
    #[tabled(rename = "Batch")]
    batch: String,
    #[tabled(rename = "Enrolled")]
    enrolled: String,
}

pub async fn handle(
    portal: &Portal,
    args: EnrollmentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        EnrollmentsCommand::List { batch, student } => {
            let mut enrollments_handle = portal.enrollments();
            let mut students_handle = portal.students();
            let mut batches_handle = portal.batches();
            let enrollments = util::fetch(&mut enrollments_handle, global).await?;
            let students = util::fetch(&mut students_handle, global).await?;
            let batches = util::fetch(&mut batches_handle, global).await?;
            let student_index = LookupIndex::build(&students);
            let batch_index = LookupIndex::build(&batches);

            let visible: Vec<&Enrollment> = enrollments
                .iter()
                .filter(|e| batch.is_none_or(|id| e.batch_id == id))
                .filter(|e| student.is_none_or(|id| e.student_id == id))
                .collect();

            let out = output::render_list(
                &global.output,
                &visible,
                |enrollment| EnrollmentRow {
                    id: enrollment.id.to_string(),
                    student: lookup::student_name(&student_index, enrollment.student_id),
                    batch: lookup::batch_name(&batch_index, enrollment.batch_id),
                    enrolled: enrollment
                        .enrolled_on
                        .map_or_else(|| "-".into(), |d| d.to_string()),
                },
                |enrollment| enrollment.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EnrollmentsCommand::Add {
            student,
            batch,
            date,
        } => {
            let enrolled_on = util::parse_opt_date(date.as_deref(), "date")?;
            let created = portal
                .enroll_student(NewEnrollment {
                    student_id: student,
                    batch_id: batch,
                    enrolled_on,
                })
                .await?;
            util::notify(
                &format!(
                    "Enrolled student {} into batch {} (id {})",
                    created.student_id, created.batch_id, created.id
                ),
                global.quiet,
            );
            Ok(())
        }

        EnrollmentsCommand::Rm { id } => {
            if !util::confirm(&format!("Withdraw enrollment {id}?"), global.yes)? {
                return Ok(());
            }
            portal.withdraw_enrollment(id).await?;
            util::notify("Enrollment withdrawn", global.quiet);
            Ok(())
        }
    }
}
