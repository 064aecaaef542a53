//! Attendance command handlers.

use tabled::Tabled;

use campus_core::filter::AttendanceFilter;
use campus_core::lookup::{self, LookupIndex};
use campus_core::stats::AttendanceSummary;
use campus_core::{AttendanceInput, AttendanceRecord, Portal};

use crate::cli::{AttendanceArgs, AttendanceCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AttendanceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Student")]
    student: String,
    #[tabled(rename = "Batch")]
    batch: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn build_filters(
    batch: Option<campus_core::RecordId>,
    student: Option<campus_core::RecordId>,
    date: Option<&str>,
    status: Option<&str>,
) -> Result<Vec<AttendanceFilter>, CliError> {
    let mut filters = Vec::new();
    if let Some(id) = batch {
        filters.push(AttendanceFilter::ByBatch(id));
    }
    if let Some(id) = student {
        filters.push(AttendanceFilter::ByStudent(id));
    }
    if let Some(raw) = date {
        filters.push(AttendanceFilter::OnDate(util::parse_date(raw, "date")?));
    }
    if let Some(raw) = status {
        filters.push(AttendanceFilter::ByStatus(util::parse_attendance_status(
            raw,
        )?));
    }
    Ok(filters)
}

pub async fn handle(
    portal: &Portal,
    args: AttendanceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AttendanceCommand::List {
            batch,
            student,
            date,
            status,
        } => {
            let filters =
                build_filters(batch, student, date.as_deref(), status.as_deref())?;

            let mut attendance_handle = portal.attendance();
            let mut students_handle = portal.students();
            let mut batches_handle = portal.batches();
            let records = util::fetch(&mut attendance_handle, global).await?;
            let students = util::fetch(&mut students_handle, global).await?;
            let batches = util::fetch(&mut batches_handle, global).await?;
            let student_index = LookupIndex::build(&students);
            let batch_index = LookupIndex::build(&batches);

            let visible: Vec<&AttendanceRecord> = records
                .iter()
                .filter(|r| filters.iter().all(|f| f.matches(r)))
                .collect();

            let out = output::render_list(
                &global.output,
                &visible,
                |record| AttendanceRow {
                    id: record.id.to_string(),
                    date: record.date.to_string(),
                    student: lookup::student_name(&student_index, record.student_id),
                    batch: lookup::batch_name(&batch_index, record.batch_id),
                    status: record.status.to_string(),
                },
                |record| record.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AttendanceCommand::Summary { batch, student } => {
            let filters = build_filters(batch, student, None, None)?;

            let mut attendance_handle = portal.attendance();
            let records = util::fetch(&mut attendance_handle, global).await?;

            let selected: Vec<AttendanceRecord> = records
                .iter()
                .filter(|r| filters.iter().all(|f| f.matches(r)))
                .cloned()
                .collect();
            let summary = AttendanceSummary::from_records(&selected);

            let rate = summary
                .rate_pct()
                .map_or_else(|| "-".into(), |r| format!("{r:.1}%"));
            let out = [
                format!("Sessions:  {}", summary.total),
                format!("Present:   {}", summary.present),
                format!("Late:      {}", summary.late),
                format!("Absent:    {}", summary.absent),
                format!("Rate:      {rate}"),
            ]
            .join("\n");
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AttendanceCommand::Mark {
            student,
            batch,
            date,
            status,
        } => {
            let date = util::parse_date_or_today(date.as_deref(), "date")?;
            let status = util::parse_attendance_status(&status)?;
            let created = portal
                .mark_attendance(AttendanceInput {
                    student_id: student,
                    batch_id: batch,
                    date,
                    status,
                })
                .await?;
            util::notify(
                &format!(
                    "Marked student {} {} on {} (record {})",
                    created.student_id, created.status, created.date, created.id
                ),
                global.quiet,
            );
            Ok(())
        }

        AttendanceCommand::Set { id, status } => {
            let status = util::parse_attendance_status(&status)?;
            let updated = portal.set_attendance_status(id, status).await?;
            util::notify(
                &format!("Record {} set to {}", updated.id, updated.status),
                global.quiet,
            );
            Ok(())
        }
    }
}
