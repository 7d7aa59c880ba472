//! Binary entry point: parse arguments and dispatch to the daemon loop or a
//! one-shot command.

use anyhow::Result;

use waqtr::Waqtr;
use waqtr::args::{CliAction, ParsedArgs};
use waqtr::commands::{
    calendar::handle_calendar_command, help::display_help, help::display_version,
    next::handle_next_command, set::handle_set_command, simulate::handle_simulate_command,
    status::handle_status_command, tracker::handle_tasbih_command,
    tracker::handle_tracker_command,
};
use waqtr::{log_end, log_error, log_pipe};

fn main() {
    let parsed = ParsedArgs::parse(std::env::args());

    if let Err(e) = run_action(parsed.action) {
        log_pipe!();
        log_error!("{e:#}");
        log_end!();
        std::process::exit(1);
    }
}

fn run_action(action: CliAction) -> Result<()> {
    match action {
        CliAction::Run {
            debug_enabled,
            config_dir,
        } => {
            apply_config_dir(config_dir)?;
            Waqtr::new(debug_enabled).run()
        }
        CliAction::StatusCommand {
            debug_enabled,
            config_dir,
        } => {
            apply_config_dir(config_dir)?;
            handle_status_command(debug_enabled)
        }
        CliAction::NextCommand { config_dir } => {
            apply_config_dir(config_dir)?;
            handle_next_command()
        }
        CliAction::CalendarCommand { date } => handle_calendar_command(date.as_deref()),
        CliAction::TrackerCommand { args, config_dir } => {
            apply_config_dir(config_dir)?;
            handle_tracker_command(&args)
        }
        CliAction::TasbihCommand { args, config_dir } => {
            apply_config_dir(config_dir)?;
            handle_tasbih_command(&args)
        }
        CliAction::SetCommand { fields, config_dir } => {
            apply_config_dir(config_dir)?;
            handle_set_command(&fields)
        }
        CliAction::SimulateCommand {
            start_time,
            end_time,
            multiplier,
            config_dir,
        } => {
            apply_config_dir(config_dir)?;
            handle_simulate_command(&start_time, &end_time, multiplier)
        }
        CliAction::ShowHelp => {
            display_help();
            Ok(())
        }
        CliAction::ShowVersion => {
            display_version();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            display_help();
            std::process::exit(1);
        }
    }
}

fn apply_config_dir(config_dir: Option<String>) -> Result<()> {
    if let Some(dir) = config_dir {
        waqtr::config::set_config_dir(&dir)?;
    }
    Ok(())
}
