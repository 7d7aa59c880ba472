//! # Waqtr Library
//!
//! Internal library for the waqtr binary application.
//!
//! This library exists to enable testing of the timing internals and provide
//! clean separation between CLI dispatch (main.rs) and application logic.
//!
//! ## Architecture
//!
//! - **Core Logic**: `waqt` resolves the active prayer window from a daily
//!   timetable, `calendar` converts Gregorian dates to the Bengali calendar
//! - **Data**: `timings` holds the parsed daily timetable, `provider` fetches
//!   it from the remote timings service
//! - **Configuration**: `config` module for TOML-based settings with hot-reload
//! - **Commands**: `commands` module for CLI subcommands (status, next,
//!   calendar, tracker, set, simulate)
//! - **Infrastructure**: signal handling, desktop notifications, logging,
//!   and the time source abstraction

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod calendar;
pub mod commands;
pub mod config;
pub mod constants;
pub mod notify;
pub mod provider;
pub mod time_source;
pub mod timings;
pub mod tracker;
pub mod waqt;

mod core;

pub use crate::core::Waqtr;
