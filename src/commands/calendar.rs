//! Bengali calendar date display.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::calendar::BanglaDate;

/// Print the Bengali date for today or an explicit Gregorian date.
pub fn handle_calendar_command(date: Option<&str>) -> Result<()> {
    let gregorian = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("could not parse '{raw}' as YYYY-MM-DD"))?,
        None => crate::time_source::now().date_naive(),
    };

    let bangla = BanglaDate::from_gregorian(gregorian);
    log_version!();
    log_block_start!("{}", gregorian.format("%A, %-d %B %Y"));
    log_indented!("{}", bangla.format_bengali());
    log_indented!("({bangla})");
    log_end!();
    Ok(())
}
