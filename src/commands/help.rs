//! Help text display.

/// Print usage information for all commands and flags.
pub fn display_help() {
    let version = env!("CARGO_PKG_VERSION");
    print!(
        "\
waqtr v{version} - prayer-time companion for the terminal

USAGE:
    waqtr [FLAGS] [COMMAND] [ARGS]

Running without a command starts the foreground companion: a live status
line with the active waqt, time remaining, and sehri/iftar countdown,
refreshed every second.

COMMANDS:
    status                     Fetch today's timetable and print the full status
    next                       Print the countdown to the next sehri/iftar event
    calendar [YYYY-MM-DD]      Show the Bengali calendar date (today by default)
    tracker [show]             Show today's devotional tracker
    tracker salah <waqt> [sunnah]
                               Mark a prayer completed (fard, or sunnah)
    tracker check <item>       Toggle a checklist item for today
    tracker read <passage> <count>
                               Record reading progress for a passage
    tasbih                     Advance the tally counter by one
    tasbih reset               Reset the tally counter
    set <field> <value> ...    Update config fields (city, country, method,
                               notify, update_interval)
    simulate <start> <end> [mult]
                               Replay a time range against the resolver,
                               datetimes as \"YYYY-MM-DD HH:MM:SS\"

FLAGS:
    -d, --debug                Enable detailed debug output
    -c, --config <dir>         Use an alternate configuration directory
    -h, --help                 Show this help
    -V, --version              Show version
"
    );
}

/// Print the version line.
pub fn display_version() {
    println!("waqtr v{}", env!("CARGO_PKG_VERSION"));
}
