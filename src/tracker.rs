//! Devotional tracker state with local JSON persistence.
//!
//! Keeps the user's self-reported progress: per-day salah completion (fard
//! and sunnah per prayer), a per-day Ramadan checklist, and a running tasbih
//! tally. State lives in `tracker.json` next to the config file and is opaque
//! to the window resolver, which never reads it.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::constants::TRACKER_FILE_NAME;
use crate::waqt::Waqt;

/// Checklist items offered when a day has no stored entries yet.
pub const DEFAULT_CHECKLIST: [&str; 5] =
    ["Fasting", "Quran recitation", "Taraweeh", "Charity", "Dua"];

/// Completion marks for one prayer on one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalahMark {
    #[serde(default)]
    pub fard: bool,
    #[serde(default)]
    pub sunnah: bool,
}

/// Everything tracked for a single day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    #[serde(default)]
    pub salah: BTreeMap<String, SalahMark>,
    #[serde(default)]
    pub checklist: BTreeMap<String, bool>,
    /// Reading progress per passage, e.g. verses read in a surah.
    #[serde(default)]
    pub reading: BTreeMap<String, u32>,
}

/// The full persisted tracker state.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerStore {
    /// Day records keyed by ISO date (YYYY-MM-DD).
    #[serde(default)]
    pub days: BTreeMap<String, DayRecord>,
    /// Running tally counter; survives across days until reset.
    #[serde(default)]
    pub tasbih: u64,
}

impl TrackerStore {
    /// Load the tracker from the config directory, defaulting to empty when
    /// the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&tracker_path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tracker state {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("tracker state {} is corrupted", path.display()))
    }

    /// Persist the tracker back to the config directory.
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&tracker_path()?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create tracker directory {}", parent.display())
            })?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)
            .with_context(|| format!("failed to write tracker state {}", path.display()))?;
        Ok(())
    }

    fn day_key(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days.get(&Self::day_key(date))
    }

    pub fn day_mut(&mut self, date: NaiveDate) -> &mut DayRecord {
        self.days.entry(Self::day_key(date)).or_default()
    }

    /// Mark a prayer as completed for the day. Marking is one-way; rerunning
    /// the command keeps the mark set.
    pub fn mark_salah(&mut self, date: NaiveDate, waqt: Waqt, sunnah: bool) {
        let mark = self
            .day_mut(date)
            .salah
            .entry(waqt.display_name().to_string())
            .or_default();
        if sunnah {
            mark.sunnah = true;
        } else {
            mark.fard = true;
        }
    }

    /// Record reading progress for a passage on the given day. Later calls
    /// overwrite earlier ones, so re-reporting a lower number winds back.
    pub fn set_reading(&mut self, date: NaiveDate, passage: &str, progress: u32) {
        self.day_mut(date)
            .reading
            .insert(passage.to_string(), progress);
    }

    /// Toggle a checklist item for the day, returning the new state.
    pub fn toggle_check(&mut self, date: NaiveDate, item: &str) -> bool {
        let entry = self
            .day_mut(date)
            .checklist
            .entry(item.to_string())
            .or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn increment_tasbih(&mut self) -> u64 {
        self.tasbih += 1;
        self.tasbih
    }

    pub fn reset_tasbih(&mut self) {
        self.tasbih = 0;
    }
}

fn tracker_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join(TRACKER_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TrackerStore::load_from_path(&dir.path().join("tracker.json")).unwrap();
        assert_eq!(store, TrackerStore::default());
    }

    #[test]
    fn state_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.json");

        let mut store = TrackerStore::default();
        store.mark_salah(d(2026, 3, 1), Waqt::Fajr, false);
        store.mark_salah(d(2026, 3, 1), Waqt::Fajr, true);
        store.toggle_check(d(2026, 3, 1), "Fasting");
        store.increment_tasbih();
        store.save_to_path(&path).unwrap();

        let loaded = TrackerStore::load_from_path(&path).unwrap();
        assert_eq!(loaded, store);
        let mark = loaded.day(d(2026, 3, 1)).unwrap().salah.get("Fajr").unwrap();
        assert!(mark.fard && mark.sunnah);
    }

    #[test]
    fn marking_is_idempotent() {
        let mut store = TrackerStore::default();
        store.mark_salah(d(2026, 3, 1), Waqt::Asr, false);
        store.mark_salah(d(2026, 3, 1), Waqt::Asr, false);
        let mark = store.day(d(2026, 3, 1)).unwrap().salah.get("Asr").unwrap();
        assert!(mark.fard);
        assert!(!mark.sunnah);
    }

    #[test]
    fn checklist_toggles() {
        let mut store = TrackerStore::default();
        assert!(store.toggle_check(d(2026, 3, 2), "Dua"));
        assert!(!store.toggle_check(d(2026, 3, 2), "Dua"));
    }

    #[test]
    fn reading_progress_overwrites() {
        let mut store = TrackerStore::default();
        store.set_reading(d(2026, 3, 5), "Al-Baqarah", 30);
        store.set_reading(d(2026, 3, 5), "Al-Baqarah", 45);
        assert_eq!(
            store.day(d(2026, 3, 5)).unwrap().reading.get("Al-Baqarah"),
            Some(&45)
        );
    }

    #[test]
    fn days_are_independent() {
        let mut store = TrackerStore::default();
        store.toggle_check(d(2026, 3, 1), "Fasting");
        assert!(store.day(d(2026, 3, 2)).is_none());
    }

    #[test]
    fn tasbih_counts_and_resets() {
        let mut store = TrackerStore::default();
        assert_eq!(store.increment_tasbih(), 1);
        assert_eq!(store.increment_tasbih(), 2);
        store.reset_tasbih();
        assert_eq!(store.tasbih, 0);
    }

    #[test]
    fn corrupted_state_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(TrackerStore::load_from_path(&path).is_err());
    }
}
