//! Accelerated replay of a time range against the resolver.
//!
//! Installs a simulated time source and walks the clock from start to end,
//! logging every waqt transition with a simulated timestamp prefix. One
//! timetable is fetched up front and reused for the whole range, so replays
//! spanning several days show the same schedule each day.

use anyhow::{Result, anyhow};
use std::sync::Arc;
use std::time::Duration;

use super::load_config_and_fetch;
use crate::time_source::{self, SimulatedTimeSource};
use crate::waqt::{self, Waqt};

/// Simulated seconds between resolver samples.
const STEP_SECS: u64 = 60;

pub fn handle_simulate_command(start: &str, end: &str, multiplier: f64) -> Result<()> {
    let start_time = time_source::parse_datetime(start).map_err(|e| anyhow!(e))?;
    let end_time = time_source::parse_datetime(end).map_err(|e| anyhow!(e))?;
    if end_time <= start_time {
        return Err(anyhow!("simulation end must be after its start"));
    }

    time_source::init_time_source(Arc::new(SimulatedTimeSource::new(
        start_time, end_time, multiplier,
    )));

    log_version!();
    log_block_start!(
        "Simulating {} to {} at {multiplier}x",
        start_time.format("%Y-%m-%d %H:%M:%S"),
        end_time.format("%Y-%m-%d %H:%M:%S")
    );

    let (_config, fetched) = load_config_and_fetch()?;

    let mut previous: Option<Waqt> = None;
    let mut transitions = 0u32;

    loop {
        let now = time_source::now();
        let state = waqt::resolve(&fetched.timings, now.time());

        if previous != Some(state.active) {
            if previous.is_some() {
                transitions += 1;
            }
            log_block_start!(
                "Entering {} waqt ({}), next {}",
                state.active.display_name(),
                state.active.bengali_name(),
                state.next.display_name()
            );
            previous = Some(state.active);
        }

        if time_source::simulation_ended() {
            break;
        }
        time_source::sleep(Duration::from_secs(STEP_SECS));
    }

    log_block_start!("Simulation complete: {transitions} transitions");
    log_end!();
    Ok(())
}
