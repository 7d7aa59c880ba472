//! Time source abstraction for supporting both real-time and simulated time.
//!
//! This module provides a trait-based abstraction that allows the application
//! to use either real system time or simulated time. Simulation mode drives
//! the `simulate` subcommand and time-dependent tests without waiting for
//! actual time to pass.

use chrono::{DateTime, Duration as ChronoDuration, Local};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Duration as StdDuration;

/// Global time source instance, defaults to RealTimeSource
static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting time operations
pub trait TimeSource: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Local>;

    /// Sleep for the specified duration (or simulate it)
    fn sleep(&self, duration: StdDuration);

    /// Check if this is a simulated time source
    fn is_simulated(&self) -> bool;

    /// Check if simulation has ended (always false for real time)
    fn is_ended(&self) -> bool {
        false
    }
}

/// Real-time implementation that uses actual system time
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn sleep(&self, duration: StdDuration) {
        std::thread::sleep(duration);
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Simulated time source that advances the clock by the slept duration.
///
/// Each `sleep(d)` advances simulated time by `d` while only spending
/// `d / multiplier` of real time, so a full day of prayer windows can be
/// replayed in seconds. The clock is capped at `end_time`.
pub struct SimulatedTimeSource {
    start_time: DateTime<Local>,
    end_time: DateTime<Local>,
    /// Time acceleration factor (e.g. 60.0 = one simulated minute per second)
    multiplier: f64,
    accumulated: std::sync::Mutex<StdDuration>,
}

impl SimulatedTimeSource {
    /// Create a new simulated time source.
    ///
    /// # Arguments
    /// * `start_time` - Starting time for the simulation
    /// * `end_time` - Ending time for the simulation
    /// * `multiplier` - Time acceleration; values at or below zero fall back
    ///   to one simulated hour per real second
    pub fn new(start_time: DateTime<Local>, end_time: DateTime<Local>, multiplier: f64) -> Self {
        Self {
            start_time,
            end_time,
            multiplier: if multiplier <= 0.0 { 3600.0 } else { multiplier },
            accumulated: std::sync::Mutex::new(StdDuration::ZERO),
        }
    }

    fn current_time(&self) -> DateTime<Local> {
        let accumulated = self.accumulated.lock().unwrap();
        let elapsed = ChronoDuration::milliseconds(accumulated.as_millis() as i64);
        let simulated = self.start_time + elapsed;
        if simulated > self.end_time {
            self.end_time
        } else {
            simulated
        }
    }
}

impl TimeSource for SimulatedTimeSource {
    fn now(&self) -> DateTime<Local> {
        self.current_time()
    }

    fn sleep(&self, duration: StdDuration) {
        {
            let mut accumulated = self.accumulated.lock().unwrap();
            *accumulated += duration;
        }
        let real_secs = duration.as_secs_f64() / self.multiplier;
        if real_secs > 0.0 {
            std::thread::sleep(StdDuration::from_secs_f64(real_secs));
        }
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn is_ended(&self) -> bool {
        self.current_time() >= self.end_time
    }
}

/// Initialize the global time source (call once at startup)
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Check if the time source has been initialized
pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

/// Get the current time from the global time source
pub fn now() -> DateTime<Local> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource)).now()
}

/// Sleep for the specified duration using the global time source
pub fn sleep(duration: StdDuration) {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .sleep(duration)
}

/// Check if we're running in simulation mode
pub fn is_simulated() -> bool {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .is_simulated()
}

/// Check if simulation has reached its end time (always false for real time)
pub fn simulation_ended() -> bool {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .is_ended()
}

/// Parse a datetime string in the format "YYYY-MM-DD HH:MM:SS"
pub fn parse_datetime(s: &str) -> Result<DateTime<Local>, String> {
    use chrono::{NaiveDateTime, TimeZone};

    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| {
            Local
                .from_local_datetime(&naive)
                .single()
                .ok_or_else(|| "Ambiguous or invalid local time".to_string())
        })
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))
        .and_then(|r| r)
}
