//! Daily prayer timetable types and timestamp parsing.
//!
//! The remote provider hands back wall-clock strings ("04:23", sometimes with
//! a timezone suffix like "04:23 (+06)"). Everything downstream works on
//! minute-of-day values, so parsing happens exactly once here and fails fast
//! on malformed input rather than letting bad values propagate into the
//! resolver.

use anyhow::{Context, Result, bail};
use chrono::{NaiveTime, Timelike};

use crate::constants::MINUTES_PER_DAY;

/// A wall-clock time with no date component, stored as minutes since midnight.
///
/// Ordering and equality are by minute value. Arithmetic wraps at midnight,
/// which is how the overnight Isha window is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Construct from an hour and minute. Returns None if out of range.
    pub fn new(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour * 60 + minute))
        } else {
            None
        }
    }

    /// Construct from a raw minute-of-day value (0..1440).
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Parse a provider timestamp.
    ///
    /// Accepts "HH:MM" with an optional suffix after whitespace ("04:23 (+06)").
    /// Non-numeric fields or out-of-range values are an error; the caller must
    /// not feed partial data into the resolver.
    pub fn parse(s: &str) -> Result<Self> {
        let head = s.split_whitespace().next().unwrap_or("");
        let (hh, mm) = head
            .split_once(':')
            .with_context(|| format!("timestamp '{s}' is not in HH:MM form"))?;
        let hour: u16 = hh
            .parse()
            .with_context(|| format!("timestamp '{s}' has a non-numeric hour"))?;
        let minute: u16 = mm
            .parse()
            .with_context(|| format!("timestamp '{s}' has a non-numeric minute"))?;
        match Self::new(hour, minute) {
            Some(t) => Ok(t),
            None => bail!("timestamp '{s}' is out of range"),
        }
    }

    /// Truncate a full-precision time to its minute of day.
    pub fn from_naive(t: NaiveTime) -> Self {
        Self((t.hour() * 60 + t.minute()) as u16)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Forward distance in minutes from `self` to `other`, wrapping at
    /// midnight. `a.minutes_until(a)` is zero.
    pub fn minutes_until(self, other: TimeOfDay) -> u16 {
        (other.0 + MINUTES_PER_DAY - self.0) % MINUTES_PER_DAY
    }

    /// Add minutes, wrapping at midnight.
    pub fn wrapping_add(self, minutes: u16) -> TimeOfDay {
        Self((self.0 + minutes % MINUTES_PER_DAY) % MINUTES_PER_DAY)
    }

    /// Subtract minutes, wrapping at midnight.
    pub fn wrapping_sub(self, minutes: u16) -> TimeOfDay {
        Self((self.0 + MINUTES_PER_DAY - minutes % MINUTES_PER_DAY) % MINUTES_PER_DAY)
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// The canonical prayer timestamps for one calendar day.
///
/// Timestamps are monotonically non-decreasing across the day. The one
/// ordering exception is handled downstream: the Isha window runs overnight
/// into the next day's Fajr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTimings {
    pub fajr: TimeOfDay,
    pub sunrise: TimeOfDay,
    pub dhuhr: TimeOfDay,
    pub asr: TimeOfDay,
    pub maghrib: TimeOfDay,
    pub isha: TimeOfDay,
    /// Explicit sunset marker where the provider distinguishes it from maghrib.
    pub sunset: Option<TimeOfDay>,
    /// End of the pre-dawn meal, where provided.
    pub imsak: Option<TimeOfDay>,
    /// Astronomical midnight marker, where provided.
    pub midnight: Option<TimeOfDay>,
}

impl DailyTimings {
    /// The six required events in display order, with their canonical names.
    pub fn listed(&self) -> [(&'static str, TimeOfDay); 6] {
        [
            ("Fajr", self.fajr),
            ("Sunrise", self.sunrise),
            ("Dhuhr", self.dhuhr),
            ("Asr", self.asr),
            ("Maghrib", self.maghrib),
            ("Isha", self.isha),
        ]
    }
}
