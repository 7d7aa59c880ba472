//! File watching module for hot config reloading.
//!
//! Monitors the configuration file and signals the main loop when it changes,
//! so a city or notification edit takes effect without restarting the daemon.

use anyhow::{Context, Result};
use notify::{
    Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::{Duration, Instant};

use crate::constants::CONFIG_DEBOUNCE_MS;

/// Start watching the configuration file for changes.
///
/// Spawns a background thread that owns the watcher and forwards debounced
/// change events over `reload_tx`. Editors often write files in several
/// steps, so events within the debounce window collapse into one reload.
///
/// The watcher observes the parent directory rather than the file itself,
/// which survives the replace-by-rename strategy most editors use.
pub fn start_config_watcher(reload_tx: Sender<()>, debug_enabled: bool) -> Result<()> {
    let config_path = crate::config::get_config_path()?;
    let watch_dir = config_path
        .parent()
        .context("config path has no parent directory")?
        .to_path_buf();
    let file_name = config_path
        .file_name()
        .context("config path has no file name")?
        .to_os_string();

    if debug_enabled {
        log_pipe!();
        log_debug!("Watching {} for config changes", config_path.display());
    }

    let (event_tx, event_rx) = std::sync::mpsc::channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {
                        // Only forward events touching the config file itself
                        let relevant = event
                            .paths
                            .iter()
                            .any(|p| p.file_name() == Some(file_name.as_os_str()));
                        if relevant {
                            let _ = event_tx.send(());
                        }
                    }
                    _ => {}
                }
            }
        },
        NotifyConfig::default(),
    )
    .context("failed to create file watcher")?;

    watcher
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch directory {}", watch_dir.display()))?;

    thread::spawn(move || {
        // Keep the watcher alive for the lifetime of the thread
        let _watcher = watcher;
        let debounce = Duration::from_millis(CONFIG_DEBOUNCE_MS);
        let mut last_reload: Option<Instant> = None;

        while event_rx.recv().is_ok() {
            if let Some(previous) = last_reload
                && previous.elapsed() < debounce
            {
                continue;
            }
            last_reload = Some(Instant::now());
            if reload_tx.send(()).is_err() {
                // Main loop is gone; stop watching
                break;
            }
        }
    });

    Ok(())
}
