//! Desktop notification delivery over D-Bus.
//!
//! Sends one-shot notifications through the standard
//! `org.freedesktop.Notifications` interface using zbus's blocking API.
//! Delivery is best effort: a missing session bus or notification daemon is
//! logged and otherwise ignored.

use anyhow::{Context, Result};
use std::collections::HashMap;
use zbus::blocking::Connection;
use zbus::zvariant::Value;

/// Milliseconds before the notification expires on its own.
const EXPIRE_TIMEOUT_MS: i32 = 10_000;

/// D-Bus proxy trait for the freedesktop notification daemon.
#[zbus::proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    #[allow(clippy::too_many_arguments)]
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: Vec<&str>,
        hints: HashMap<&str, Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

/// Send a desktop notification.
///
/// Returns the server-assigned notification id, mostly useful in tests.
pub fn send_notification(summary: &str, body: &str) -> Result<u32> {
    let connection = Connection::session().context("failed to connect to the session bus")?;
    let proxy = NotificationsProxyBlocking::new(&connection)
        .context("notification service is unavailable")?;
    let id = proxy
        .notify(
            "waqtr",
            0,
            "appointment-soon",
            summary,
            body,
            Vec::new(),
            HashMap::new(),
            EXPIRE_TIMEOUT_MS,
        )
        .context("failed to deliver notification")?;
    Ok(id)
}
