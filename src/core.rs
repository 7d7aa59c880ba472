//! Main application loop and high-level flow coordination.
//!
//! The loop is single-threaded and timer-driven: every tick it gathers the
//! current instant, re-resolves the active prayer window from scratch,
//! redraws the status line, and runs the notification minute-match. The only
//! blocking work (the provider fetch) happens on background threads that
//! report over channels drained here.
//!
//! Fetches are tagged with a generation counter. Changing the city or rolling
//! over to a new day bumps the generation; responses carrying a stale tag are
//! discarded, so a slow fetch for the previous city can never clobber newer
//! data.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Timelike};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use fs2::FileExt;
use std::fs::File;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::calendar::BanglaDate;
use crate::commands::format_hms;
use crate::config::{self, Config};
use crate::constants::LOCK_FILE_NAME;
use crate::provider::{self, FetchResult};
use crate::timings::TimeOfDay;
use crate::waqt::{self, ResolvedState, Waqt};

/// Restores the cursor when the main loop exits, however it exits.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Self {
        let _ = execute!(std::io::stdout(), cursor::Hide);
        Self
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(std::io::stdout(), cursor::Show);
    }
}

/// The waqtr daemon: owns the lock file, channels, and cached state.
pub struct Waqtr {
    debug_enabled: bool,
}

impl Waqtr {
    pub fn new(debug_enabled: bool) -> Self {
        Self { debug_enabled }
    }

    /// Run the foreground loop until a shutdown signal arrives.
    pub fn run(self) -> Result<()> {
        log_version!();
        if self.debug_enabled {
            log_pipe!();
            log_debug!("Debug mode enabled");
        }

        let _lock = acquire_lock()?;
        let _term = TerminalGuard::new();

        let shutdown = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&shutdown))
            .context("failed to register SIGTERM handler")?;
        signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&shutdown))
            .context("failed to register SIGINT handler")?;

        let mut config = Config::load()?;
        log_block_start!("Location: {} ({})", config.city(), config.country());

        let (reload_tx, reload_rx) = channel();
        if let Err(e) = config::start_config_watcher(reload_tx, self.debug_enabled) {
            log_pipe!();
            log_warning!("Config hot reload unavailable: {e}");
        }

        let (fetch_tx, fetch_rx) = channel();
        let mut generation: u64 = 0;
        let mut data: Option<FetchResult> = None;
        let mut fetch_pending = true;
        let mut current_date = crate::time_source::now().date_naive();
        provider::spawn_fetch(config.clone(), generation, fetch_tx.clone());
        log_block_start!("Fetching timetable for {}...", config.city());

        let mut last_state: Option<ResolvedState> = None;

        while !shutdown.load(Ordering::SeqCst) {
            // Config edits: reload, and refetch when the location changed
            if reload_rx.try_recv().is_ok() {
                match Config::load() {
                    Ok(new_config) => {
                        let city_changed = new_config.city() != config.city()
                            || new_config.country() != config.country()
                            || new_config.method() != config.method();
                        config = new_config;
                        clear_status_line();
                        log_block_start!("Configuration reloaded");
                        if city_changed {
                            generation += 1;
                            fetch_pending = true;
                            data = None;
                            last_state = None;
                            provider::spawn_fetch(config.clone(), generation, fetch_tx.clone());
                            log_decorated!("Fetching timetable for {}...", config.city());
                        }
                    }
                    Err(e) => {
                        clear_status_line();
                        log_pipe!();
                        log_warning!("Ignoring invalid configuration: {e}");
                    }
                }
            }

            // Fetch results: accept only the current generation
            while let Ok((fetch_generation, result)) = fetch_rx.try_recv() {
                if fetch_generation != generation {
                    if self.debug_enabled {
                        clear_status_line();
                        log_pipe!();
                        log_debug!("Discarding stale fetch (generation {fetch_generation})");
                    }
                    continue;
                }
                fetch_pending = false;
                match result {
                    Ok(fetched) => {
                        clear_status_line();
                        announce_timetable(&fetched);
                        data = Some(fetched);
                        last_state = None;
                    }
                    Err(e) => {
                        clear_status_line();
                        log_pipe!();
                        log_warning!("Timetable fetch failed: {e:#}");
                        log_indented!("Will retry at the next day rollover or city change");
                    }
                }
            }

            let now = crate::time_source::now();

            // Day rollover invalidates yesterday's timetable
            let today = now.date_naive();
            if today != current_date {
                current_date = today;
                generation += 1;
                fetch_pending = true;
                provider::spawn_fetch(config.clone(), generation, fetch_tx.clone());
                clear_status_line();
                log_block_start!("New day, refreshing timetable for {}", config.city());
            }

            match &data {
                Some(fetched) => {
                    let state = waqt::resolve(&fetched.timings, now.time());
                    if last_state.map(|s| s.active) != Some(state.active) {
                        clear_status_line();
                        announce_waqt(state.active, &fetched.timings, today);
                    }
                    self.notification_check(&config, fetched, now.time());
                    render_status_line(&state, fetched, now.time());
                    last_state = Some(state);
                }
                None if fetch_pending => render_plain_status("waiting for timetable data..."),
                None => render_plain_status("no timetable data (edit config to retry)"),
            }

            crate::time_source::sleep(Duration::from_secs(config.update_interval()));
        }

        clear_status_line();
        log_block_start!("Shutting down");
        log_end!();
        Ok(())
    }

    /// Fire a desktop notification when a prayer begins.
    ///
    /// Matches the current minute against each prayer timestamp, gated on
    /// seconds being zero so a minute fires at most once. A tick that skips
    /// the zero second misses the notification; delivery is best effort by
    /// contract.
    fn notification_check(&self, config: &Config, data: &FetchResult, now: chrono::NaiveTime) {
        if !config.notify_enabled() || now.second() != 0 {
            return;
        }
        let now_minute = TimeOfDay::from_naive(now);
        for window in waqt::primary_windows(&data.timings) {
            let waqt = window.waqt;
            if window.start == now_minute {
                let summary = format!("{} নামাজের সময় হয়েছে", waqt.bengali_name());
                let body = format!(
                    "আজকের {} নামাজের সময় শুরু হয়েছে ({})",
                    waqt.bengali_name(),
                    window.start
                );
                if let Err(e) = crate::notify::send_notification(&summary, &body) {
                    clear_status_line();
                    log_pipe!();
                    log_warning!("Notification failed: {e}");
                } else if self.debug_enabled {
                    clear_status_line();
                    log_pipe!();
                    log_debug!("Notified start of {}", waqt.display_name());
                }
            }
        }
    }
}

/// Take the runtime lock so only one daemon instance runs per session.
fn acquire_lock() -> Result<File> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".to_string());
    let lock_path = format!("{runtime_dir}/{LOCK_FILE_NAME}");

    // Open without truncating so a losing race cannot wipe the holder's pid
    let mut lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .with_context(|| format!("failed to open lock file {lock_path}"))?;

    lock_file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!("another waqtr instance is already running (lock: {lock_path})")
    })?;

    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;
    Ok(lock_file)
}

fn announce_timetable(data: &FetchResult) {
    log_block_start!("Timetable for {}", data.city);
    if let Some(hijri) = &data.hijri {
        log_indented!("Hijri date: {hijri}");
    }
    for (name, time) in data.timings.listed() {
        log_indented!("{name:<8} {time}");
    }
}

/// Announce a newly entered waqt, including the Bengali calendar date the
/// header line carries.
fn announce_waqt(active: Waqt, timings: &crate::timings::DailyTimings, today: NaiveDate) {
    let bangla = BanglaDate::from_gregorian(today);
    match active {
        Waqt::Waiting => log_block_start!("Between windows, waiting"),
        _ => log_block_start!(
            "Entering {} waqt ({}) · {}",
            active.display_name(),
            active.bengali_name(),
            bangla.format_bengali()
        ),
    }
    if active.is_prayer() {
        let spans = waqt::forbidden_windows(timings.sunrise, timings.dhuhr, timings.maghrib);
        for span in spans {
            log_indented!(
                "{}: {} to {}",
                span.kind.display_name(),
                span.start,
                span.end
            );
        }
    }
}

fn clear_status_line() {
    let mut stdout = std::io::stdout();
    let _ = execute!(stdout, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine));
}

fn render_plain_status(message: &str) {
    let mut stdout = std::io::stdout();
    let _ = execute!(stdout, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine));
    let _ = write!(stdout, "┣ {message}");
    let _ = stdout.flush();
}

/// Redraw the one-line live status without scrolling the log.
fn render_status_line(state: &ResolvedState, data: &FetchResult, now: chrono::NaiveTime) {
    let (event, event_secs) =
        waqt::next_daily_event(data.timings.fajr, data.timings.maghrib, now);

    let mut line = match state.active {
        Waqt::Waiting => "waiting".to_string(),
        _ => format!(
            "{} · ends in {} · {:.0}%",
            state.active.display_name(),
            format_hms(state.remaining_secs),
            state.progress_percent
        ),
    };
    line.push_str(&format!(
        " · {} in {}",
        event.display_name(),
        format_hms(event_secs)
    ));

    let now_minute = TimeOfDay::from_naive(now);
    let spans = waqt::forbidden_windows(data.timings.sunrise, data.timings.dhuhr, data.timings.maghrib);
    if spans.iter().any(|s| s.contains(now_minute)) {
        line.push_str(" · forbidden time");
    }

    let mut stdout = std::io::stdout();
    let _ = execute!(stdout, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine));
    let _ = write!(stdout, "┣ {line}");
    let _ = stdout.flush();
}
