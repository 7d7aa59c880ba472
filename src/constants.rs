//! Application-wide constants and default values.
//!
//! Configuration defaults live here alongside the fixed liturgical and
//! calendrical tables. Values that are part of the observable contract
//! (forbidden-window offsets, the Bengali month table) are fixed by tradition
//! and are not configurable.

/// Base URL of the remote timings provider.
pub const PROVIDER_BASE_URL: &str = "https://api.aladhan.com/v1/timingsByCity";

/// Default city when none is configured.
pub const DEFAULT_CITY: &str = "Dhaka";

/// Default country sent to the timings provider.
pub const DEFAULT_COUNTRY: &str = "Bangladesh";

/// Default calculation method code for the timings provider
/// (2 = Islamic Society of North America).
pub const DEFAULT_METHOD: u8 = 2;

/// Whether desktop notifications are enabled by default.
pub const DEFAULT_NOTIFY: bool = false;

/// Default main-loop tick interval in seconds.
pub const DEFAULT_UPDATE_INTERVAL: u64 = 1;

/// Bounds for the configurable tick interval.
pub const MINIMUM_UPDATE_INTERVAL: u64 = 1;
pub const MAXIMUM_UPDATE_INTERVAL: u64 = 60;

/// Network timeout for provider requests in seconds.
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Minutes after sunrise during which prayer is discouraged.
pub const FORBIDDEN_AFTER_SUNRISE_MINS: u16 = 15;

/// Forbidden span before solar noon: [dhuhr - 7, dhuhr - 1] minutes.
pub const FORBIDDEN_BEFORE_NOON_START_MINS: u16 = 7;
pub const FORBIDDEN_BEFORE_NOON_END_MINS: u16 = 1;

/// Minutes before sunset during which prayer is discouraged.
pub const FORBIDDEN_BEFORE_SUNSET_MINS: u16 = 16;

/// Minutes in one civil day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Bengali year offset for dates on or after the Pohela Boishakh anchor.
pub const BANGLA_YEAR_OFFSET: i32 = 593;

/// Gregorian month (1-based) and day of Pohela Boishakh, the Bengali new year.
pub const BANGLA_ANCHOR_MONTH: u32 = 4;
pub const BANGLA_ANCHOR_DAY: u32 = 14;

/// Day counts of the twelve Bengali months, Boishakh through Choitro.
/// Falgun (index 10) gains a day in adjusted years.
pub const BANGLA_MONTH_LENGTHS: [u32; 12] = [31, 31, 31, 31, 31, 30, 30, 30, 30, 30, 29, 30];

/// Index of Falgun in the month table.
pub const BANGLA_LEAP_MONTH_INDEX: usize = 10;

/// Debounce duration for config file change events (in milliseconds).
pub const CONFIG_DEBOUNCE_MS: u64 = 500;

/// Name of the lock file preventing concurrent daemon instances.
pub const LOCK_FILE_NAME: &str = "waqtr.lock";

/// Config and state file names under the waqtr config directory.
pub const CONFIG_FILE_NAME: &str = "waqtr.toml";
pub const TRACKER_FILE_NAME: &str = "tracker.json";
