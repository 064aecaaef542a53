//! Watch mode: keep the dashboard subscribed and refresh on an interval.
//!
//! Each tick invalidates the dashboard key and waits for the subscribed
//! handle to settle again. Between invalidation and refetch completion
//! the previous metrics stay on screen -- the stale-while-revalidate
//! window, visible on purpose instead of a flash to empty.

use std::time::Duration;

use owo_colors::OwoColorize;

use campus_core::{Portal, keys};

use crate::cli::{GlobalOpts, WatchArgs};
use crate::error::CliError;
use crate::output;

use super::dashboard;
use super::util;

pub async fn handle(
    portal: &Portal,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let interval = Duration::from_secs(args.interval.max(1));
    let color = output::should_color(&global.color);

    // Hold one subscription for the whole session so invalidations
    // trigger immediate refetches.
    let mut handle = portal.dashboard_metrics();
    handle.ready().await.map_err(CliError::from)?;

    let mut ticks: u64 = 0;
    loop {
        let snapshot = handle.settled().await;
        if let Some(metrics) = snapshot.data {
            let stamp = util::today().to_string();
            let header = if color {
                format!("campus dashboard ({})", stamp.dimmed())
            } else {
                format!("campus dashboard ({stamp})")
            };
            let body = dashboard::render(&metrics, color);
            output::print_output(&format!("{header}\n{body}\n"), global.quiet);
        }
        if let Some(error) = snapshot.error {
            // Keep watching: stale data stays up, the failure is noted.
            util::notify(&format!("refresh failed: {error}"), global.quiet);
        }

        ticks += 1;
        if args.count.is_some_and(|count| ticks >= count) {
            return Ok(());
        }

        tokio::time::sleep(interval).await;
        portal.cache().invalidate(&keys::dashboard_metrics());
    }
}
