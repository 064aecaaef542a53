//! Fee command handlers.

use tabled::Tabled;

use campus_core::filter::FeeFilter;
use campus_core::lookup::{self, LookupIndex};
use campus_core::stats::FeeSummary;
use campus_core::{Fee, NewFee, Portal};

use crate::cli::{FeesArgs, FeesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct FeeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Student")]
    student: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub async fn handle(portal: &Portal, args: FeesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        FeesCommand::List {
            student,
            status,
            overdue,
        } => {
            let mut filters = Vec::new();
            if let Some(id) = student {
                filters.push(FeeFilter::ByStudent(id));
            }
            if let Some(raw) = status {
                filters.push(FeeFilter::ByStatus(util::parse_fee_status(&raw)?));
            }
            if overdue {
                filters.push(FeeFilter::Overdue(util::today()));
            }

            let mut fees_handle = portal.fees();
            let mut students_handle = portal.students();
            let fees = util::fetch(&mut fees_handle, global).await?;
            let students = util::fetch(&mut students_handle, global).await?;
            let index = LookupIndex::build(&students);

            let today = util::today();
            let visible: Vec<&Fee> = fees
                .iter()
                .filter(|f| filters.iter().all(|flt| flt.matches(f)))
                .collect();

            let out = output::render_list(
                &global.output,
                &visible,
                |fee| FeeRow {
                    id: fee.id.to_string(),
                    student: lookup::student_name(&index, fee.student_id),
                    amount: format!("{:.2}", fee.amount),
                    due: fee.due_date.to_string(),
                    status: if fee.is_overdue(today) {
                        format!("{} (overdue)", fee.status)
                    } else {
                        fee.status.to_string()
                    },
                },
                |fee| fee.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FeesCommand::Summary => {
            let mut fees_handle = portal.fees();
            let fees = util::fetch(&mut fees_handle, global).await?;
            let summary = FeeSummary::from_fees(&fees, util::today());

            let out = [
                format!("Total:     {:.2}", summary.total_amount),
                format!("Collected: {:.2}", summary.collected),
                format!("Pending:   {:.2}", summary.pending),
                format!("Overdue:   {} fee(s)", summary.overdue_count),
            ]
            .join("\n");
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FeesCommand::Add {
            student,
            amount,
            due,
        } => {
            let due_date = util::parse_date(&due, "due")?;
            let created = portal
                .add_fee(NewFee {
                    student_id: student,
                    amount,
                    due_date,
                })
                .await?;
            util::notify(
                &format!(
                    "Fee of {:.2} added for student {} (id {})",
                    created.amount, created.student_id, created.id
                ),
                global.quiet,
            );
            Ok(())
        }

        FeesCommand::Pay { id, date } => {
            let paid_on = util::parse_date_or_today(date.as_deref(), "date")?;
            let updated = portal.record_fee_payment(id, paid_on).await?;
            util::notify(
                &format!("Fee {} marked {} on {paid_on}", updated.id, updated.status),
                global.quiet,
            );
            Ok(())
        }
    }
}
