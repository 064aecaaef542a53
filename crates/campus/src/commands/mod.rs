//! Command handlers, one module per resource group.

pub mod attendance;
pub mod batches;
pub mod config_cmd;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod exams;
pub mod fees;
pub mod messages;
pub mod results;
pub mod students;
pub mod teachers;
pub mod util;
pub mod watch;

use campus_core::Portal;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Command,
    portal: &Portal,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Students(args) => students::handle(portal, args, global).await,
        Command::Teachers(args) => teachers::handle(portal, args, global).await,
        Command::Courses(args) => courses::handle(portal, args, global).await,
        Command::Batches(args) => batches::handle(portal, args, global).await,
        Command::Enrollments(args) => enrollments::handle(portal, args, global).await,
        Command::Attendance(args) => attendance::handle(portal, args, global).await,
        Command::Fees(args) => fees::handle(portal, args, global).await,
        Command::Exams(args) => exams::handle(portal, args, global).await,
        Command::Results(args) => results::handle(portal, args, global).await,
        Command::Messages(args) => messages::handle(portal, args, global).await,
        Command::Dashboard => dashboard::handle(portal, global).await,
        Command::Watch(args) => watch::handle(portal, args, global).await,
        // Handled before a Portal exists.
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
