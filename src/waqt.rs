//! Prayer-window state resolution.
//!
//! This module handles the core logic for determining which prayer window
//! (waqt) is active at a given instant, how much time remains in it, and how
//! far through it the clock has progressed. It also derives the three
//! traditionally disliked (forbidden) sub-windows of the day and the countdown
//! to the next fasting event.
//!
//! ## Key Functionality
//! - **Window Resolution**: Determining the active waqt, the next one in the
//!   cycle, remaining seconds, and progress percentage
//! - **Midnight Crossing**: The Isha window runs overnight into the next
//!   day's Fajr and is the single wrap-around case handled explicitly
//! - **Forbidden Windows**: Fixed-offset spans around sunrise, solar noon,
//!   and sunset
//! - **Fasting Countdown**: Time until sehri ends (Fajr) or iftar begins
//!   (Maghrib)
//!
//! Everything here is a pure function of a [`DailyTimings`] set and the
//! current instant. State is recomputed from scratch on every tick; nothing
//! carries over between calls.

use chrono::{NaiveTime, Timelike};
use std::cmp::Ordering;

use crate::constants::{
    FORBIDDEN_AFTER_SUNRISE_MINS, FORBIDDEN_BEFORE_NOON_END_MINS, FORBIDDEN_BEFORE_NOON_START_MINS,
    FORBIDDEN_BEFORE_SUNSET_MINS,
};
use crate::timings::{DailyTimings, TimeOfDay};

/// The named prayer windows of the day, plus the two non-prayer states the
/// resolver can report.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Waqt {
    /// Dawn window, Fajr to sunrise
    Fajr,
    /// Forenoon span between sunrise and solar noon. Not one of the five
    /// obligatory windows; reported only when no primary window matches.
    Duha,
    /// Midday window, Dhuhr to Asr
    Dhuhr,
    /// Afternoon window, Asr to Maghrib
    Asr,
    /// Sunset window, Maghrib to Isha
    Maghrib,
    /// Night window, Isha to the next day's Fajr (crosses midnight)
    Isha,
    /// Fallback when no window matches. Zero duration, zero progress.
    /// Only occurs transiently at day boundaries or with degenerate input.
    Waiting,
}

impl Waqt {
    /// Returns true for the five obligatory prayer windows.
    pub fn is_prayer(&self) -> bool {
        matches!(
            self,
            Self::Fajr | Self::Dhuhr | Self::Asr | Self::Maghrib | Self::Isha
        )
    }

    /// Returns the display name for this waqt.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Fajr => "Fajr",
            Self::Duha => "Duha",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
            Self::Waiting => "Waiting",
        }
    }

    /// Returns the Bengali name for this waqt.
    pub fn bengali_name(&self) -> &'static str {
        match self {
            Self::Fajr => "ফজর",
            Self::Duha => "চাশত",
            Self::Dhuhr => "যোহর",
            Self::Asr => "আসর",
            Self::Maghrib => "মাগরিব",
            Self::Isha => "এশা",
            Self::Waiting => "অপেক্ষমাণ",
        }
    }

    /// Returns the next window in the fixed daily cycle.
    ///
    /// Duha is an interstitial span whose next window is always Dhuhr.
    /// Waiting points at Fajr, the first window of the cycle.
    pub fn next_waqt(&self) -> Self {
        match self {
            Self::Fajr => Self::Dhuhr,
            Self::Duha => Self::Dhuhr,
            Self::Dhuhr => Self::Asr,
            Self::Asr => Self::Maghrib,
            Self::Maghrib => Self::Isha,
            Self::Isha => Self::Fajr,
            Self::Waiting => Self::Fajr,
        }
    }
}

/// A named span of the day bounded by two canonical timestamps.
///
/// `end` may be numerically smaller than `start`, in which case the window
/// crosses midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub waqt: Waqt,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Window {
    /// Check membership, handling midnight crossings.
    ///
    /// The lower bound is inclusive and the upper bound exclusive, so a
    /// boundary instant belongs to the window that starts there, never the
    /// one that ends there.
    pub fn contains(&self, time: TimeOfDay) -> bool {
        match self.start.cmp(&self.end) {
            Ordering::Less => time >= self.start && time < self.end,
            Ordering::Greater => time >= self.start || time < self.end,
            // start == end, empty window
            Ordering::Equal => false,
        }
    }

    /// Total span in minutes, wrapping at midnight. Zero for empty windows.
    pub fn duration_minutes(&self) -> u16 {
        self.start.minutes_until(self.end)
    }
}

/// The resolved window state at one instant.
///
/// Recomputed from scratch on every tick and never mutated incrementally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedState {
    pub active: Waqt,
    pub next: Waqt,
    pub remaining_secs: u32,
    /// Fraction of the active window already elapsed, 0 to 100.
    pub progress_percent: f64,
}

impl ResolvedState {
    fn waiting() -> Self {
        Self {
            active: Waqt::Waiting,
            next: Waqt::Waiting.next_waqt(),
            remaining_secs: 0,
            progress_percent: 0.0,
        }
    }
}

/// Build the five primary windows from adjacent timestamp pairs.
///
/// The Isha window closes at the next day's Fajr, making it the designated
/// midnight-crossing window.
pub fn primary_windows(timings: &DailyTimings) -> [Window; 5] {
    [
        Window {
            waqt: Waqt::Fajr,
            start: timings.fajr,
            end: timings.sunrise,
        },
        Window {
            waqt: Waqt::Dhuhr,
            start: timings.dhuhr,
            end: timings.asr,
        },
        Window {
            waqt: Waqt::Asr,
            start: timings.asr,
            end: timings.maghrib,
        },
        Window {
            waqt: Waqt::Maghrib,
            start: timings.maghrib,
            end: timings.isha,
        },
        Window {
            waqt: Waqt::Isha,
            start: timings.isha,
            end: timings.fajr,
        },
    ]
}

/// Resolve the active prayer window for the given instant.
///
/// Tests the five primary windows in order, then the interstitial Duha span
/// (sunrise to Dhuhr), and falls back to the zero-duration waiting state if
/// nothing matches. The first matching window wins; exclusive upper bounds
/// keep adjacent windows from both claiming a boundary instant.
///
/// # Arguments
/// * `timings` - Validated timetable for the current day
/// * `now` - Current instant; seconds matter for the remaining-time count
pub fn resolve(timings: &DailyTimings, now: NaiveTime) -> ResolvedState {
    let now_minute = TimeOfDay::from_naive(now);
    let second_of_minute = now.second();

    for window in primary_windows(timings) {
        if window.contains(now_minute) {
            return resolve_within(&window, now_minute, second_of_minute, window.waqt.next_waqt());
        }
    }

    // Interstitial forenoon span. Only consulted when no primary window
    // matched; its next window is hard-wired to Dhuhr.
    let duha = Window {
        waqt: Waqt::Duha,
        start: timings.sunrise,
        end: timings.dhuhr,
    };
    if duha.contains(now_minute) {
        return resolve_within(&duha, now_minute, second_of_minute, Waqt::Dhuhr);
    }

    ResolvedState::waiting()
}

/// Compute remaining seconds and progress for an instant known to be inside
/// the window.
fn resolve_within(
    window: &Window,
    now_minute: TimeOfDay,
    second_of_minute: u32,
    next: Waqt,
) -> ResolvedState {
    let total_secs = window.duration_minutes() as u32 * 60;
    let remaining_secs =
        (now_minute.minutes_until(window.end) as u32 * 60).saturating_sub(second_of_minute);

    // An empty window would divide by zero below; report it as fully elapsed
    let progress_percent = if total_secs == 0 {
        0.0
    } else {
        (total_secs - remaining_secs) as f64 / total_secs as f64 * 100.0
    };

    ResolvedState {
        active: window.waqt,
        next,
        remaining_secs,
        progress_percent,
    }
}

/// The three traditionally disliked prayer spans of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenKind {
    /// The minutes immediately after sunrise
    AfterSunrise,
    /// The minutes just before solar noon
    SolarNoon,
    /// The minutes leading up to sunset
    BeforeSunset,
}

impl ForbiddenKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::AfterSunrise => "After sunrise",
            Self::SolarNoon => "Solar noon",
            Self::BeforeSunset => "Before sunset",
        }
    }
}

/// A disliked sub-window anchored to one of the solar events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForbiddenWindow {
    pub kind: ForbiddenKind,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl ForbiddenWindow {
    /// Membership with the same inclusive-start, exclusive-end rule as
    /// primary windows, except the sunset span which closes exactly at
    /// sunset (inclusive end).
    pub fn contains(&self, time: TimeOfDay) -> bool {
        match self.kind {
            ForbiddenKind::BeforeSunset => time >= self.start && time <= self.end,
            _ => time >= self.start && time < self.end,
        }
    }
}

/// Derive the three forbidden windows from the day's solar anchors.
///
/// The offsets are fixed by tradition: [sunrise, sunrise+15], [dhuhr-7,
/// dhuhr-1], [maghrib-16, maghrib]. Minute arithmetic wraps at midnight,
/// though in practice these anchors never sit close enough to it to wrap.
pub fn forbidden_windows(
    sunrise: TimeOfDay,
    dhuhr: TimeOfDay,
    maghrib: TimeOfDay,
) -> [ForbiddenWindow; 3] {
    [
        ForbiddenWindow {
            kind: ForbiddenKind::AfterSunrise,
            start: sunrise,
            end: sunrise.wrapping_add(FORBIDDEN_AFTER_SUNRISE_MINS),
        },
        ForbiddenWindow {
            kind: ForbiddenKind::SolarNoon,
            start: dhuhr.wrapping_sub(FORBIDDEN_BEFORE_NOON_START_MINS),
            end: dhuhr.wrapping_sub(FORBIDDEN_BEFORE_NOON_END_MINS),
        },
        ForbiddenWindow {
            kind: ForbiddenKind::BeforeSunset,
            start: maghrib.wrapping_sub(FORBIDDEN_BEFORE_SUNSET_MINS),
            end: maghrib,
        },
    ]
}

/// The two daily fasting events a countdown can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyEvent {
    /// End of the pre-dawn meal, at Fajr
    SehriEnd,
    /// Start of the sunset meal, at Maghrib
    Iftar,
}

impl DailyEvent {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SehriEnd => "Sehri ends",
            Self::Iftar => "Iftar",
        }
    }

    pub fn bengali_name(&self) -> &'static str {
        match self {
            Self::SehriEnd => "সাহরি শেষ",
            Self::Iftar => "ইফতার",
        }
    }
}

/// Countdown to the next fasting event.
///
/// Picks Fajr if it is still ahead today, then Maghrib, then tomorrow's Fajr
/// with wrapped subtraction across midnight.
pub fn next_daily_event(
    fajr: TimeOfDay,
    maghrib: TimeOfDay,
    now: NaiveTime,
) -> (DailyEvent, u32) {
    let now_minute = TimeOfDay::from_naive(now);
    let second_of_minute = now.second();

    let (event, target) = if now_minute < fajr {
        (DailyEvent::SehriEnd, fajr)
    } else if now_minute < maghrib {
        (DailyEvent::Iftar, maghrib)
    } else {
        // Past maghrib; the next event is tomorrow's fajr
        (DailyEvent::SehriEnd, fajr)
    };

    let remaining =
        (now_minute.minutes_until(target) as u32 * 60).saturating_sub(second_of_minute);
    (event, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u16, m: u16) -> TimeOfDay {
        TimeOfDay::new(h, m).unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn sample_timings() -> DailyTimings {
        DailyTimings {
            fajr: t(5, 0),
            sunrise: t(6, 15),
            dhuhr: t(12, 5),
            asr: t(15, 30),
            maghrib: t(18, 10),
            isha: t(19, 30),
            sunset: None,
            imsak: None,
            midnight: None,
        }
    }

    #[test]
    fn midday_scenario() {
        let state = resolve(&sample_timings(), at(13, 0, 0));

        assert_eq!(state.active, Waqt::Dhuhr);
        assert_eq!(state.next, Waqt::Asr);
        assert_eq!(state.remaining_secs, 9000);

        // ((15:30-12:05) - (15:30-13:00)) / (15:30-12:05) * 100
        let total = 205.0 * 60.0;
        let expected = (total - 9000.0) / total * 100.0;
        assert!((state.progress_percent - expected).abs() < 1e-9);
    }

    #[test]
    fn each_window_resolves_with_correct_successor() {
        let timings = sample_timings();
        let cases = [
            (at(5, 30, 0), Waqt::Fajr, Waqt::Dhuhr),
            (at(8, 0, 0), Waqt::Duha, Waqt::Dhuhr),
            (at(12, 5, 0), Waqt::Dhuhr, Waqt::Asr),
            (at(16, 0, 0), Waqt::Asr, Waqt::Maghrib),
            (at(18, 30, 0), Waqt::Maghrib, Waqt::Isha),
            (at(22, 0, 0), Waqt::Isha, Waqt::Fajr),
            (at(2, 0, 0), Waqt::Isha, Waqt::Fajr),
        ];
        for (now, active, next) in cases {
            let state = resolve(&timings, now);
            assert_eq!(state.active, active, "wrong waqt at {now}");
            assert_eq!(state.next, next, "wrong successor at {now}");
        }
    }

    #[test]
    fn boundary_belongs_to_the_starting_window() {
        let timings = sample_timings();
        // Asr begins at 15:30; the instant belongs to Asr, not Dhuhr
        assert_eq!(resolve(&timings, at(15, 30, 0)).active, Waqt::Asr);
        // Sunrise ends Fajr and begins Duha
        assert_eq!(resolve(&timings, at(6, 15, 0)).active, Waqt::Duha);
        // Fajr start closes the overnight Isha window
        assert_eq!(resolve(&timings, at(5, 0, 0)).active, Waqt::Fajr);
        assert_eq!(resolve(&timings, at(4, 59, 59)).active, Waqt::Isha);
    }

    #[test]
    fn overnight_window_remaining_seconds() {
        let window = Window {
            waqt: Waqt::Isha,
            start: t(20, 0),
            end: t(5, 0),
        };
        assert!(window.contains(t(23, 0)));
        assert!(window.contains(t(2, 0)));
        assert!(!window.contains(t(12, 0)));

        // 23:00 -> (24:00-23:00) + (05:00-00:00) = 6h
        let state = resolve_within(&window, t(23, 0), 0, Waqt::Fajr);
        assert_eq!(state.remaining_secs, 21_600);

        // 02:00 -> direct forward difference, 3h
        let state = resolve_within(&window, t(2, 0), 0, Waqt::Fajr);
        assert_eq!(state.remaining_secs, 10_800);
    }

    #[test]
    fn seconds_of_minute_reduce_the_countdown() {
        let timings = sample_timings();
        let on_the_minute = resolve(&timings, at(13, 0, 0));
        let mid_minute = resolve(&timings, at(13, 0, 45));
        assert_eq!(mid_minute.remaining_secs, on_the_minute.remaining_secs - 45);
    }

    #[test]
    fn progress_spans_the_window() {
        let timings = sample_timings();

        let at_start = resolve(&timings, at(12, 5, 0));
        assert_eq!(at_start.progress_percent, 0.0);

        let near_end = resolve(&timings, at(15, 29, 59));
        assert!(near_end.progress_percent > 99.0);
        assert!(near_end.progress_percent <= 100.0);
    }

    #[test]
    fn empty_window_does_not_divide_by_zero() {
        let window = Window {
            waqt: Waqt::Dhuhr,
            start: t(12, 0),
            end: t(12, 0),
        };
        assert!(!window.contains(t(12, 0)));
        assert_eq!(window.duration_minutes(), 0);

        let state = resolve_within(&window, t(12, 0), 0, Waqt::Asr);
        assert_eq!(state.progress_percent, 0.0);
        assert_eq!(state.remaining_secs, 0);
    }

    #[test]
    fn degenerate_timings_fall_back_to_waiting() {
        // All timestamps equal leaves every window empty
        let timings = DailyTimings {
            fajr: t(5, 0),
            sunrise: t(5, 0),
            dhuhr: t(5, 0),
            asr: t(5, 0),
            maghrib: t(5, 0),
            isha: t(5, 0),
            sunset: None,
            imsak: None,
            midnight: None,
        };
        let state = resolve(&timings, at(10, 0, 0));
        assert_eq!(state.active, Waqt::Waiting);
        assert_eq!(state.next, Waqt::Fajr);
        assert_eq!(state.remaining_secs, 0);
        assert_eq!(state.progress_percent, 0.0);
    }

    #[test]
    fn forbidden_windows_use_fixed_offsets() {
        let spans = forbidden_windows(t(6, 0), t(12, 0), t(18, 0));

        assert_eq!(spans[0].kind, ForbiddenKind::AfterSunrise);
        assert_eq!(spans[0].start, t(6, 0));
        assert_eq!(spans[0].end, t(6, 15));

        assert_eq!(spans[1].kind, ForbiddenKind::SolarNoon);
        assert_eq!(spans[1].start, t(11, 53));
        assert_eq!(spans[1].end, t(11, 59));

        assert_eq!(spans[2].kind, ForbiddenKind::BeforeSunset);
        assert_eq!(spans[2].start, t(17, 44));
        assert_eq!(spans[2].end, t(18, 0));
    }

    #[test]
    fn forbidden_membership() {
        let spans = forbidden_windows(t(6, 0), t(12, 0), t(18, 0));
        assert!(spans[0].contains(t(6, 0)));
        assert!(spans[0].contains(t(6, 14)));
        assert!(!spans[0].contains(t(6, 15)));
        assert!(spans[2].contains(t(18, 0)));
        assert!(!spans[2].contains(t(17, 43)));
    }

    #[test]
    fn fasting_countdown_picks_the_next_event() {
        let fajr = t(5, 0);
        let maghrib = t(18, 10);

        let (event, remaining) = next_daily_event(fajr, maghrib, at(3, 0, 0));
        assert_eq!(event, DailyEvent::SehriEnd);
        assert_eq!(remaining, 2 * 3600);

        let (event, remaining) = next_daily_event(fajr, maghrib, at(12, 0, 0));
        assert_eq!(event, DailyEvent::Iftar);
        assert_eq!(remaining, (6 * 60 + 10) * 60);

        // Past maghrib the target wraps to tomorrow's fajr
        let (event, remaining) = next_daily_event(fajr, maghrib, at(20, 0, 0));
        assert_eq!(event, DailyEvent::SehriEnd);
        assert_eq!(remaining, 9 * 3600);
    }

    #[test]
    fn fasting_countdown_honors_seconds() {
        let (_, remaining) = next_daily_event(t(5, 0), t(18, 10), at(4, 59, 30));
        assert_eq!(remaining, 30);
    }

    #[test]
    fn waqt_cycle_is_closed() {
        let mut waqt = Waqt::Fajr;
        for _ in 0..5 {
            waqt = waqt.next_waqt();
        }
        assert_eq!(waqt, Waqt::Fajr);
    }
}
