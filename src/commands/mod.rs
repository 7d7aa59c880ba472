//! Command-line command handlers for waqtr.
//!
//! This module contains implementations for one-shot CLI commands. Each
//! command is implemented in its own submodule to keep the code organized.

pub mod calendar;
pub mod help;
pub mod next;
pub mod set;
pub mod simulate;
pub mod status;
pub mod tracker;

use anyhow::Result;

use crate::config::Config;
use crate::provider::{self, FetchResult};

/// Format a second count as HH:MM:SS.
pub fn format_hms(total_secs: u32) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Load the configuration and fetch today's timetable, shared by the
/// one-shot commands that need live data.
pub(crate) fn load_config_and_fetch() -> Result<(Config, FetchResult)> {
    let config = Config::load()?;
    log_block_start!("Fetching timetable for {}...", config.city());
    let fetched = provider::fetch_timings(&config)?;
    Ok((config, fetched))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hms_formatting() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(59), "00:00:59");
        assert_eq!(format_hms(3600), "01:00:00");
        assert_eq!(format_hms(9000), "02:30:00");
        assert_eq!(format_hms(86_399), "23:59:59");
    }
}
