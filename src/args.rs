//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. It supports the standard help,
//! version, and debug flags while gracefully handling unknown options.

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the foreground daemon loop
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// One-shot: fetch today's timetable and print the full status
    StatusCommand {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// One-shot: print the countdown to the next fasting event
    NextCommand { config_dir: Option<String> },
    /// Print the Bengali calendar date for today or a given date
    CalendarCommand { date: Option<String> },
    /// Devotional tracker operations (show, salah, check)
    TrackerCommand {
        args: Vec<String>,
        config_dir: Option<String>,
    },
    /// Tally counter operations (count, reset)
    TasbihCommand {
        args: Vec<String>,
        config_dir: Option<String>,
    },
    /// Update configuration fields in place
    SetCommand {
        fields: Vec<(String, String)>,
        config_dir: Option<String>,
    },
    /// Replay a time range against the resolver at accelerated speed
    SimulateCommand {
        start_time: String,
        end_time: String,
        multiplier: f64,
        config_dir: Option<String>,
    },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// Flags may appear before the subcommand; the first bare word selects
    /// the subcommand and everything after it belongs to that subcommand.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args())
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut debug_enabled = false;
        let mut config_dir: Option<String> = None;
        let mut command: Option<(String, Vec<String>)> = None;

        let mut idx = 0;
        while idx < args_vec.len() {
            let arg = &args_vec[idx];
            match arg.as_str() {
                "--help" | "-h" => {
                    return ParsedArgs {
                        action: CliAction::ShowHelp,
                    };
                }
                "--version" | "-V" => {
                    return ParsedArgs {
                        action: CliAction::ShowVersion,
                    };
                }
                "--debug" | "-d" => {
                    debug_enabled = true;
                    idx += 1;
                }
                "--config" | "-c" => {
                    match args_vec.get(idx + 1) {
                        Some(dir) if !dir.starts_with('-') => {
                            config_dir = Some(dir.clone());
                            idx += 2;
                        }
                        _ => {
                            log_warning!("--config requires a directory argument");
                            return ParsedArgs {
                                action: CliAction::ShowHelpDueToError,
                            };
                        }
                    };
                }
                unknown if unknown.starts_with('-') => {
                    log_warning!("Unknown option: {}", unknown);
                    return ParsedArgs {
                        action: CliAction::ShowHelpDueToError,
                    };
                }
                word => {
                    command = Some((word.to_string(), args_vec[idx + 1..].to_vec()));
                    break;
                }
            }
        }

        let action = match command {
            None => CliAction::Run {
                debug_enabled,
                config_dir,
            },
            Some((name, rest)) => match name.as_str() {
                "status" => CliAction::StatusCommand {
                    debug_enabled,
                    config_dir,
                },
                "next" => CliAction::NextCommand { config_dir },
                "calendar" => CliAction::CalendarCommand {
                    date: rest.first().cloned(),
                },
                "tracker" => CliAction::TrackerCommand {
                    args: rest,
                    config_dir,
                },
                "tasbih" => CliAction::TasbihCommand {
                    args: rest,
                    config_dir,
                },
                "set" => match parse_set_fields(&rest) {
                    Some(fields) => CliAction::SetCommand { fields, config_dir },
                    None => CliAction::ShowHelpDueToError,
                },
                "simulate" => match parse_simulate(&rest) {
                    Some((start_time, end_time, multiplier)) => CliAction::SimulateCommand {
                        start_time,
                        end_time,
                        multiplier,
                        config_dir,
                    },
                    None => CliAction::ShowHelpDueToError,
                },
                unknown => {
                    log_warning!("Unknown command: {}", unknown);
                    CliAction::ShowHelpDueToError
                }
            },
        };

        ParsedArgs { action }
    }
}

/// Parse `set` arguments as field-value pairs.
fn parse_set_fields(rest: &[String]) -> Option<Vec<(String, String)>> {
    if rest.is_empty() || rest.len() % 2 != 0 {
        log_warning!("set expects field value pairs, e.g. `waqtr set city Dhaka`");
        return None;
    }
    Some(
        rest.chunks(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect(),
    )
}

/// Parse `simulate` arguments: start, end, optional multiplier.
fn parse_simulate(rest: &[String]) -> Option<(String, String, f64)> {
    let start = rest.first()?;
    let end = rest.get(1)?;
    let multiplier = match rest.get(2) {
        Some(raw) => match raw.parse() {
            Ok(m) => m,
            Err(_) => {
                log_warning!("simulate multiplier must be a number, got '{}'", raw);
                return None;
            }
        },
        None => 60.0,
    };
    Some((start.clone(), end.clone(), multiplier))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        let full: Vec<String> = std::iter::once("waqtr".to_string())
            .chain(args.iter().map(|s| s.to_string()))
            .collect();
        ParsedArgs::parse(full).action
    }

    #[test]
    fn bare_invocation_runs_the_daemon() {
        assert_eq!(
            parse(&[]),
            CliAction::Run {
                debug_enabled: false,
                config_dir: None
            }
        );
    }

    #[test]
    fn flags_before_subcommand() {
        assert_eq!(
            parse(&["--debug", "-c", "/tmp/waqtr", "status"]),
            CliAction::StatusCommand {
                debug_enabled: true,
                config_dir: Some("/tmp/waqtr".to_string())
            }
        );
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parse(&["--help"]), CliAction::ShowHelp);
        assert_eq!(parse(&["-V"]), CliAction::ShowVersion);
        assert_eq!(parse(&["--debug", "--help", "status"]), CliAction::ShowHelp);
    }

    #[test]
    fn set_collects_field_pairs() {
        assert_eq!(
            parse(&["set", "city", "Sylhet", "notify", "true"]),
            CliAction::SetCommand {
                fields: vec![
                    ("city".to_string(), "Sylhet".to_string()),
                    ("notify".to_string(), "true".to_string())
                ],
                config_dir: None
            }
        );
    }

    #[test]
    fn set_with_odd_arguments_is_an_error() {
        crate::logger::Log::set_enabled(false);
        assert_eq!(parse(&["set", "city"]), CliAction::ShowHelpDueToError);
        crate::logger::Log::set_enabled(true);
    }

    #[test]
    fn simulate_defaults_the_multiplier() {
        assert_eq!(
            parse(&["simulate", "2026-01-01 00:00:00", "2026-01-02 00:00:00"]),
            CliAction::SimulateCommand {
                start_time: "2026-01-01 00:00:00".to_string(),
                end_time: "2026-01-02 00:00:00".to_string(),
                multiplier: 60.0,
                config_dir: None
            }
        );
    }

    #[test]
    fn unknown_input_shows_help() {
        crate::logger::Log::set_enabled(false);
        assert_eq!(parse(&["--frobnicate"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["dance"]), CliAction::ShowHelpDueToError);
        crate::logger::Log::set_enabled(true);
    }

    #[test]
    fn calendar_takes_an_optional_date() {
        assert_eq!(parse(&["calendar"]), CliAction::CalendarCommand { date: None });
        assert_eq!(
            parse(&["calendar", "2026-04-14"]),
            CliAction::CalendarCommand {
                date: Some("2026-04-14".to_string())
            }
        );
    }
}
