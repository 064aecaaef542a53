//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use indicatif::ProgressBar;

use campus_core::{AttendanceStatus, FeeStatus, ResourceHandle};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Await a resource's first terminal state, showing a spinner on
/// interactive terminals.
pub async fn fetch<T: Send + Sync + 'static>(
    handle: &mut ResourceHandle<T>,
    global: &GlobalOpts,
) -> Result<Arc<T>, CliError> {
    let progress = spinner(global.quiet);
    let result = handle.ready().await;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }
    result.map_err(CliError::from)
}

fn spinner(quiet: bool) -> Option<ProgressBar> {
    if quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let progress = ProgressBar::new_spinner();
    progress.set_message("fetching...");
    progress.enable_steady_tick(Duration::from_millis(80));
    Some(progress)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Parse a `YYYY-MM-DD` flag value.
pub fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("'{raw}' is not a YYYY-MM-DD date"),
    })
}

/// Parse an optional date flag, or `None` when absent.
pub fn parse_opt_date(raw: Option<&str>, field: &str) -> Result<Option<NaiveDate>, CliError> {
    raw.map(|r| parse_date(r, field)).transpose()
}

/// Parse an optional date flag, defaulting to today.
pub fn parse_date_or_today(raw: Option<&str>, field: &str) -> Result<NaiveDate, CliError> {
    match raw {
        Some(r) => parse_date(r, field),
        None => Ok(today()),
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_attendance_status(raw: &str) -> Result<AttendanceStatus, CliError> {
    AttendanceStatus::from_str(raw).map_err(|_| CliError::Validation {
        field: "status".into(),
        reason: format!("'{raw}' is not one of: present, absent, late"),
    })
}

pub fn parse_fee_status(raw: &str) -> Result<FeeStatus, CliError> {
    FeeStatus::from_str(raw).map_err(|_| CliError::Validation {
        field: "status".into(),
        reason: format!("'{raw}' is not one of: pending, paid"),
    })
}

/// Print an action confirmation line unless `--quiet`.
pub fn notify(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{message}");
    }
}
