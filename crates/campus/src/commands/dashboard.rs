//! Dashboard summary handler.

use indexmap::IndexMap;
use owo_colors::OwoColorize;

use campus_core::{DashboardMetrics, Portal};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

/// Render the metric lines in a stable display order.
pub(super) fn render(metrics: &DashboardMetrics, color: bool) -> String {
    let mut fields: IndexMap<&str, String> = IndexMap::new();
    fields.insert("Students", metrics.total_students.to_string());
    fields.insert("Teachers", metrics.total_teachers.to_string());
    fields.insert("Courses", metrics.total_courses.to_string());
    fields.insert("Active batches", metrics.active_batches.to_string());
    fields.insert(
        "Attendance rate",
        metrics
            .attendance_rate_pct
            .map_or_else(|| "-".into(), |r| format!("{r:.1}%")),
    );
    fields.insert("Fees collected", format!("{:.2}", metrics.fees_collected));
    fields.insert("Fees pending", format!("{:.2}", metrics.fees_pending));

    fields
        .iter()
        .map(|(label, value)| {
            if color {
                format!("{:<16} {}", label.bold(), value)
            } else {
                format!("{label:<16} {value}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn handle(portal: &Portal, global: &GlobalOpts) -> Result<(), CliError> {
    let mut handle = portal.dashboard_metrics();
    let metrics = util::fetch(&mut handle, global).await?;

    let color = output::should_color(&global.color);
    let out = match global.output {
        OutputFormat::Table | OutputFormat::Plain => render(&metrics, color),
        _ => output::render_single(
            &global.output,
            metrics.as_ref(),
            |m| render(m, false),
            |_| String::new(),
        ),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
