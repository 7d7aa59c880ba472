//! In-place configuration field updates.

use anyhow::Result;

use crate::config;

/// Apply `field value` pairs to the active configuration file.
///
/// Each pair is validated independently; the first invalid pair aborts the
/// run without touching later fields.
pub fn handle_set_command(fields: &[(String, String)]) -> Result<()> {
    log_version!();
    let path = config::get_config_path()?;

    if !path.exists() {
        config::create_default_config(&path)?;
        log_block_start!("Created default configuration");
        log_indented!("{}", path.display());
    }

    log_block_start!("Updating {}", path.display());
    for (field, value) in fields {
        config::update_field(&path, field, value)?;
        log_indented!("{field} = {value}");
    }

    // Surface the merged result so typos are visible immediately
    let merged = config::Config::load_from_path(&path)?;
    log_block_start!("Active configuration");
    log_indented!("city = {}", merged.city());
    log_indented!("country = {}", merged.country());
    log_indented!("method = {}", merged.method());
    log_indented!("notify = {}", merged.notify_enabled());
    log_indented!("update_interval = {}", merged.update_interval());
    log_end!();
    Ok(())
}
