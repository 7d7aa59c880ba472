//! One-shot countdown to the next fasting event.

use anyhow::Result;

use super::{format_hms, load_config_and_fetch};
use crate::waqt;

/// Print the next sehri/iftar event and the time remaining until it.
pub fn handle_next_command() -> Result<()> {
    log_version!();
    let (_config, fetched) = load_config_and_fetch()?;

    let now = crate::time_source::now();
    let (event, secs) = waqt::next_daily_event(
        fetched.timings.fajr,
        fetched.timings.maghrib,
        now.time(),
    );

    log_block_start!(
        "{} ({}) in {}",
        event.display_name(),
        event.bengali_name(),
        format_hms(secs)
    );
    log_end!();
    Ok(())
}
