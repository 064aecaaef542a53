//! Batch command handlers.

use tabled::Tabled;

use campus_core::lookup::{self, LookupIndex};
use campus_core::{Batch, BatchUpdate, NewBatch, Portal};

use crate::cli::{BatchesArgs, BatchesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct BatchRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "Capacity")]
    capacity: String,
}

pub async fn handle(
    portal: &Portal,
    args: BatchesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        BatchesCommand::List => {
            let mut batches_handle = portal.batches();
            let mut courses_handle = portal.courses();
            let batches = util::fetch(&mut batches_handle, global).await?;
            let courses = util::fetch(&mut courses_handle, global).await?;
            let index = LookupIndex::build(&courses);

            let rows: Vec<&Batch> = batches.iter().collect();
            let out = output::render_list(
                &global.output,
                &rows,
                |batch| BatchRow {
                    id: batch.id.to_string(),
                    name: batch.name.clone(),
                    course: batch
                        .course_id
                        .map_or_else(|| "-".into(), |id| lookup::course_name(&index, id)),
                    start: batch
                        .start_date
                        .map_or_else(|| "-".into(), |d| d.to_string()),
                    capacity: batch
                        .capacity
                        .map_or_else(|| "-".into(), |c| c.to_string()),
                },
                |batch| batch.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BatchesCommand::Add {
            name,
            course,
            start_date,
            capacity,
        } => {
            let start_date = util::parse_opt_date(start_date.as_deref(), "start-date")?;
            let created = portal
                .create_batch(NewBatch {
                    name,
                    course_id: course,
                    start_date,
                    capacity,
                })
                .await?;
            util::notify(
                &format!("Batch added: {} (id {})", created.name, created.id),
                global.quiet,
            );
            Ok(())
        }

        BatchesCommand::Update {
            id,
            name,
            course,
            capacity,
        } => {
            let update = BatchUpdate {
                name,
                course_id: course,
                capacity,
            };
            let updated = portal.update_batch(id, update).await?;
            util::notify(&format!("Batch {} updated", updated.id), global.quiet);
            Ok(())
        }

        BatchesCommand::Rm { id } => {
            if !util::confirm(
                &format!("Remove batch {id}? This cannot be undone."),
                global.yes,
            )? {
                return Ok(());
            }
            portal.delete_batch(id).await?;
            util::notify("Batch removed", global.quiet);
            Ok(())
        }
    }
}
