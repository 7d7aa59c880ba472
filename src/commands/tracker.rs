//! Devotional tracker and tasbih subcommands.

use anyhow::{Result, anyhow};

use crate::calendar::to_bengali_digits;
use crate::tracker::{DEFAULT_CHECKLIST, TrackerStore};
use crate::waqt::Waqt;

/// Look up a prayer waqt by its transliterated name, case-insensitive.
fn waqt_from_name(name: &str) -> Option<Waqt> {
    match name.to_ascii_lowercase().as_str() {
        "fajr" => Some(Waqt::Fajr),
        "dhuhr" => Some(Waqt::Dhuhr),
        "asr" => Some(Waqt::Asr),
        "maghrib" => Some(Waqt::Maghrib),
        "isha" => Some(Waqt::Isha),
        _ => None,
    }
}

/// Dispatch `waqtr tracker ...`.
pub fn handle_tracker_command(args: &[String]) -> Result<()> {
    let today = crate::time_source::now().date_naive();
    let mut store = TrackerStore::load()?;

    match args.first().map(String::as_str) {
        None | Some("show") => {
            show_today(&store);
            Ok(())
        }
        Some("salah") => {
            let name = args
                .get(1)
                .ok_or_else(|| anyhow!("usage: waqtr tracker salah <waqt> [sunnah]"))?;
            let waqt = waqt_from_name(name)
                .ok_or_else(|| anyhow!("unknown waqt '{name}' (fajr, dhuhr, asr, maghrib, isha)"))?;
            let sunnah = match args.get(2).map(String::as_str) {
                None | Some("fard") => false,
                Some("sunnah") => true,
                Some(other) => return Err(anyhow!("expected 'fard' or 'sunnah', got '{other}'")),
            };
            store.mark_salah(today, waqt, sunnah);
            store.save()?;
            log_version!();
            log_block_start!(
                "Marked {} {} for today",
                waqt.display_name(),
                if sunnah { "sunnah" } else { "fard" }
            );
            log_end!();
            Ok(())
        }
        Some("check") => {
            let item = args[1..].join(" ");
            if item.is_empty() {
                return Err(anyhow!("usage: waqtr tracker check <item>"));
            }
            let checked = store.toggle_check(today, &item);
            store.save()?;
            log_version!();
            log_block_start!(
                "{} '{}'",
                if checked { "Checked" } else { "Unchecked" },
                item
            );
            log_end!();
            Ok(())
        }
        Some("read") => {
            let passage = args
                .get(1)
                .ok_or_else(|| anyhow!("usage: waqtr tracker read <passage> <count>"))?;
            let progress: u32 = args
                .get(2)
                .ok_or_else(|| anyhow!("usage: waqtr tracker read <passage> <count>"))?
                .parse()
                .map_err(|_| anyhow!("reading progress must be a number"))?;
            store.set_reading(today, passage, progress);
            store.save()?;
            log_version!();
            log_block_start!("Reading progress: {} at {}", passage, progress);
            log_end!();
            Ok(())
        }
        Some(other) => Err(anyhow!(
            "unknown tracker operation '{other}' (show, salah, check, read)"
        )),
    }
}

/// Dispatch `waqtr tasbih ...`.
pub fn handle_tasbih_command(args: &[String]) -> Result<()> {
    let mut store = TrackerStore::load()?;
    log_version!();

    match args.first().map(String::as_str) {
        None => {
            let count = store.increment_tasbih();
            store.save()?;
            log_block_start!("Tasbih: {}", to_bengali_digits(&count.to_string()));
        }
        Some("show") => {
            log_block_start!("Tasbih: {}", to_bengali_digits(&store.tasbih.to_string()));
        }
        Some("reset") => {
            store.reset_tasbih();
            store.save()?;
            log_block_start!("Tasbih reset");
        }
        Some(other) => {
            log_end!();
            return Err(anyhow!("unknown tasbih operation '{other}' (show, reset)"));
        }
    }

    log_end!();
    Ok(())
}

fn show_today(store: &TrackerStore) {
    let now = crate::time_source::now();
    let today = now.date_naive();
    let record = store.day(today).cloned().unwrap_or_default();

    log_version!();
    log_block_start!("Tracker for {}", today.format("%A, %-d %B %Y"));

    log_decorated!("Salah");
    for waqt in [
        Waqt::Fajr,
        Waqt::Dhuhr,
        Waqt::Asr,
        Waqt::Maghrib,
        Waqt::Isha,
    ] {
        let mark = record.salah.get(waqt.display_name()).copied().unwrap_or_default();
        log_indented!(
            "{:<8} fard [{}]  sunnah [{}]",
            waqt.display_name(),
            if mark.fard { "x" } else { " " },
            if mark.sunnah { "x" } else { " " }
        );
    }

    log_decorated!("Checklist");
    // Defaults first in their fixed order, then any custom items the user
    // has toggled that aren't in the default list
    for item in DEFAULT_CHECKLIST {
        let checked = record.checklist.get(item).copied().unwrap_or(false);
        log_indented!("[{}] {item}", if checked { "x" } else { " " });
    }
    for (item, checked) in &record.checklist {
        if !DEFAULT_CHECKLIST.contains(&item.as_str()) {
            log_indented!("[{}] {item}", if *checked { "x" } else { " " });
        }
    }

    if !record.reading.is_empty() {
        log_decorated!("Reading");
        for (passage, progress) in &record.reading {
            log_indented!("{passage}: {progress}");
        }
    }

    log_decorated!("Tasbih: {}", to_bengali_digits(&store.tasbih.to_string()));
    log_end!();
}
