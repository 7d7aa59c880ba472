//! One-shot status command: fetch today's timetable and print everything.

use anyhow::Result;
use chrono::Timelike;

use super::{format_hms, load_config_and_fetch};
use crate::calendar::BanglaDate;
use crate::timings::TimeOfDay;
use crate::waqt::{self, Waqt};

/// Fetch and print the timetable, active waqt, forbidden windows, and the
/// fasting countdown for the configured city.
pub fn handle_status_command(debug_enabled: bool) -> Result<()> {
    log_version!();
    if debug_enabled {
        log_pipe!();
        log_debug!("Debug mode enabled");
    }

    let (config, fetched) = load_config_and_fetch()?;
    let now = crate::time_source::now();
    let bangla = BanglaDate::from_gregorian(now.date_naive());

    log_block_start!("Timetable for {} ({})", fetched.city, config.country());
    log_indented!("Gregorian: {}", now.format("%A, %-d %B %Y"));
    log_indented!("Bengali:   {} ({bangla})", bangla.format_bengali());
    if let Some(hijri) = &fetched.hijri {
        log_indented!("Hijri:     {hijri}");
    }

    log_pipe!();
    for (name, time) in fetched.timings.listed() {
        log_indented!("{name:<8} {time}");
    }

    let state = waqt::resolve(&fetched.timings, now.time());
    match state.active {
        Waqt::Waiting => log_block_start!("No waqt active right now"),
        active => {
            log_block_start!(
                "Current waqt: {} ({})",
                active.display_name(),
                active.bengali_name()
            );
            log_indented!(
                "Ends in {} ({:.1}% elapsed)",
                format_hms(state.remaining_secs),
                state.progress_percent
            );
            log_indented!("Next: {}", state.next.display_name());
        }
    }

    let spans = waqt::forbidden_windows(
        fetched.timings.sunrise,
        fetched.timings.dhuhr,
        fetched.timings.maghrib,
    );
    let now_minute = TimeOfDay::from_naive(now.time());
    log_block_start!("Forbidden windows");
    for span in spans {
        let marker = if span.contains(now_minute) {
            "  <- now"
        } else {
            ""
        };
        log_indented!(
            "{:<14} {} to {}{marker}",
            span.kind.display_name(),
            span.start,
            span.end
        );
    }

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

    // Second-granular output is noise for a one-shot command run off the
    // minute boundary; note the reference second in debug mode only
    if debug_enabled {
        log_pipe!();
        log_debug!("Resolved at {:02}:{:02}:{:02}", now.hour(), now.minute(), now.second());
    }

    log_end!();
    Ok(())
}
