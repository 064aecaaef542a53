//! Exam result command handlers.

use tabled::Tabled;

use campus_core::lookup::{self, LookupIndex};
use campus_core::{ExamResult, Portal, ResultInput};

use crate::cli::{GlobalOpts, ResultsArgs, ResultsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Exam")]
    exam: String,
    #[tabled(rename = "Student")]
    student: String,
    #[tabled(rename = "Marks")]
    marks: String,
}

pub async fn handle(
    portal: &Portal,
    args: ResultsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ResultsCommand::List { exam } => {
            let mut results_handle = portal.results();
            let mut exams_handle = portal.exams();
            let mut students_handle = portal.students();
            let results = util::fetch(&mut results_handle, global).await?;
            let exams = util::fetch(&mut exams_handle, global).await?;
            let students = util::fetch(&mut students_handle, global).await?;
            let exam_index = LookupIndex::build(&exams);
            let student_index = LookupIndex::build(&students);

            let visible: Vec<&ExamResult> = results
                .iter()
                .filter(|r| exam.is_none_or(|id| r.exam_id == id))
                .collect();

            let out = output::render_list(
                &global.output,
                &visible,
                |result| {
                    let marks = exam_index.get(result.exam_id).map_or_else(
                        || format!("{:.1}", result.marks),
                        |exam| format!("{:.1} / {}", result.marks, exam.max_marks),
                    );
                    ResultRow {
                        id: result.id.to_string(),
                        exam: lookup::exam_name(&exam_index, result.exam_id),
                        student: lookup::student_name(&student_index, result.student_id),
                        marks,
                    }
                },
                |result| result.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ResultsCommand::Record {
            exam,
            student,
            marks,
        } => {
            let created = portal
                .record_result(ResultInput {
                    exam_id: exam,
                    student_id: student,
                    marks,
                })
                .await?;
            util::notify(
                &format!(
                    "Recorded {:.1} marks for student {} (result {})",
                    created.marks, created.student_id, created.id
                ),
                global.quiet,
            );
            Ok(())
        }

        ResultsCommand::Set { id, marks } => {
            let updated = portal.update_result(id, marks).await?;
            util::notify(
                &format!("Result {} set to {:.1}", updated.id, updated.marks),
                global.quiet,
            );
            Ok(())
        }
    }
}
