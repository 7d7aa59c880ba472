use chrono::NaiveTime;
use proptest::prelude::*;

use waqtr::timings::{DailyTimings, TimeOfDay};
use waqtr::waqt::{self, Waqt, Window};

/// Generate a valid monotonic timetable: six strictly increasing events
/// within one day, with realistic gaps between them.
fn timings_strategy() -> impl Strategy<Value = DailyTimings> {
    (
        180u16..360,
        20u16..150,
        20u16..150,
        20u16..150,
        20u16..150,
        20u16..150,
    )
        .prop_map(|(fajr, g1, g2, g3, g4, g5)| {
            let fajr = TimeOfDay::from_minutes(fajr).unwrap();
            let sunrise = fajr.wrapping_add(g1);
            let dhuhr = sunrise.wrapping_add(g2);
            let asr = dhuhr.wrapping_add(g3);
            let maghrib = asr.wrapping_add(g4);
            let isha = maghrib.wrapping_add(g5);
            DailyTimings {
                fajr,
                sunrise,
                dhuhr,
                asr,
                maghrib,
                isha,
                sunset: None,
                imsak: None,
                midnight: None,
            }
        })
}

fn minute_strategy() -> impl Strategy<Value = u16> {
    0u16..1440
}

proptest! {
    /// For any valid timetable and any instant, exactly one window claims
    /// the instant: one of the five primary windows or the forenoon span.
    /// The waiting fallback never fires on valid monotonic input.
    #[test]
    fn exactly_one_window_matches(timings in timings_strategy(), minute in minute_strategy()) {
        let now = TimeOfDay::from_minutes(minute).unwrap();

        let duha = Window {
            waqt: Waqt::Duha,
            start: timings.sunrise,
            end: timings.dhuhr,
        };
        let matches = waqt::primary_windows(&timings)
            .iter()
            .chain(std::iter::once(&duha))
            .filter(|w| w.contains(now))
            .count();
        prop_assert_eq!(matches, 1, "instant {} claimed by {} windows", now, matches);

        let state = waqt::resolve(
            &timings,
            NaiveTime::from_hms_opt(now.hour() as u32, now.minute() as u32, 0).unwrap(),
        );
        prop_assert_ne!(state.active, Waqt::Waiting);
    }

    /// Remaining seconds stay within the window's total duration and
    /// progress stays within [0, 100].
    #[test]
    fn remaining_and_progress_are_bounded(
        timings in timings_strategy(),
        minute in minute_strategy(),
        second in 0u32..60,
    ) {
        let now = NaiveTime::from_hms_opt((minute / 60) as u32, (minute % 60) as u32, second).unwrap();
        let state = waqt::resolve(&timings, now);

        let duha = Window {
            waqt: Waqt::Duha,
            start: timings.sunrise,
            end: timings.dhuhr,
        };
        let window = waqt::primary_windows(&timings)
            .iter()
            .chain(std::iter::once(&duha))
            .copied()
            .find(|w| w.waqt == state.active)
            .expect("active waqt always maps to a window on valid input");

        let total = window.duration_minutes() as u32 * 60;
        prop_assert!(state.remaining_secs <= total);
        prop_assert!((0.0..=100.0).contains(&state.progress_percent));
    }

    /// Progress is exactly zero at a window's opening instant.
    #[test]
    fn progress_is_zero_at_window_start(timings in timings_strategy()) {
        for window in waqt::primary_windows(&timings) {
            let now = NaiveTime::from_hms_opt(
                window.start.hour() as u32,
                window.start.minute() as u32,
                0,
            )
            .unwrap();
            let state = waqt::resolve(&timings, now);
            prop_assert_eq!(state.active, window.waqt);
            prop_assert_eq!(state.progress_percent, 0.0);
            prop_assert_eq!(state.remaining_secs, window.duration_minutes() as u32 * 60);
        }
    }

    /// The reported successor always follows the fixed daily cycle.
    #[test]
    fn successor_follows_the_cycle(timings in timings_strategy(), minute in minute_strategy()) {
        let now = NaiveTime::from_hms_opt((minute / 60) as u32, (minute % 60) as u32, 0).unwrap();
        let state = waqt::resolve(&timings, now);
        prop_assert_eq!(state.next, state.active.next_waqt());
    }

    /// Forbidden windows keep their fixed offsets from the solar anchors.
    #[test]
    fn forbidden_windows_keep_their_offsets(timings in timings_strategy()) {
        let spans = waqt::forbidden_windows(timings.sunrise, timings.dhuhr, timings.maghrib);

        prop_assert_eq!(spans[0].start, timings.sunrise);
        prop_assert_eq!(spans[0].start.minutes_until(spans[0].end), 15);

        prop_assert_eq!(spans[1].end.minutes_until(timings.dhuhr), 1);
        prop_assert_eq!(spans[1].start.minutes_until(spans[1].end), 6);

        prop_assert_eq!(spans[2].end, timings.maghrib);
        prop_assert_eq!(spans[2].start.minutes_until(spans[2].end), 16);
    }

    /// The fasting countdown always targets a strictly future event and
    /// never looks more than a day ahead.
    #[test]
    fn fasting_countdown_targets_the_future(
        timings in timings_strategy(),
        minute in minute_strategy(),
        second in 0u32..60,
    ) {
        let now = NaiveTime::from_hms_opt((minute / 60) as u32, (minute % 60) as u32, second).unwrap();
        let now_minute = TimeOfDay::from_minutes(minute).unwrap();
        let (event, remaining) = waqt::next_daily_event(timings.fajr, timings.maghrib, now);

        prop_assert!(remaining <= 24 * 3600);
        let expect_sehri = now_minute < timings.fajr || now_minute >= timings.maghrib;
        prop_assert_eq!(event == waqt::DailyEvent::SehriEnd, expect_sehri);
    }
}
