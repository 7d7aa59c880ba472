//! Remote timings provider client.
//!
//! Fetches the daily prayer timetable from the AlAdhan `timingsByCity`
//! endpoint. The response envelope wraps a timings object keyed by the
//! canonical event names and a date object carrying both Hijri and Gregorian
//! representations.
//!
//! Fetches run on a background thread and report over an mpsc channel tagged
//! with a generation number. The main loop only accepts the newest
//! generation, so a slow response for a previously selected city can never
//! overwrite fresher data.

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::constants::{FETCH_TIMEOUT_SECS, PROVIDER_BASE_URL};
use crate::timings::{DailyTimings, TimeOfDay};

/// Raw timing strings exactly as the provider sends them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTimings {
    #[serde(rename = "Fajr")]
    pub fajr: String,
    #[serde(rename = "Sunrise")]
    pub sunrise: String,
    #[serde(rename = "Dhuhr")]
    pub dhuhr: String,
    #[serde(rename = "Asr")]
    pub asr: String,
    #[serde(rename = "Maghrib")]
    pub maghrib: String,
    #[serde(rename = "Isha")]
    pub isha: String,
    #[serde(rename = "Sunset", default)]
    pub sunset: Option<String>,
    #[serde(rename = "Imsak", default)]
    pub imsak: Option<String>,
    #[serde(rename = "Midnight", default)]
    pub midnight: Option<String>,
}

impl TryFrom<&RawTimings> for DailyTimings {
    type Error = anyhow::Error;

    /// Parse every field up front so downstream code never sees a partial
    /// timetable.
    fn try_from(raw: &RawTimings) -> Result<Self> {
        let parse_opt = |field: &Option<String>| -> Result<Option<TimeOfDay>> {
            field.as_deref().map(TimeOfDay::parse).transpose()
        };
        Ok(Self {
            fajr: TimeOfDay::parse(&raw.fajr).context("Fajr")?,
            sunrise: TimeOfDay::parse(&raw.sunrise).context("Sunrise")?,
            dhuhr: TimeOfDay::parse(&raw.dhuhr).context("Dhuhr")?,
            asr: TimeOfDay::parse(&raw.asr).context("Asr")?,
            maghrib: TimeOfDay::parse(&raw.maghrib).context("Maghrib")?,
            isha: TimeOfDay::parse(&raw.isha).context("Isha")?,
            sunset: parse_opt(&raw.sunset).context("Sunset")?,
            imsak: parse_opt(&raw.imsak).context("Imsak")?,
            midnight: parse_opt(&raw.midnight).context("Midnight")?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct HijriMonth {
    #[serde(default)]
    en: String,
}

#[derive(Debug, Deserialize)]
struct HijriDate {
    #[serde(default)]
    day: String,
    #[serde(default)]
    month: Option<HijriMonth>,
    #[serde(default)]
    year: String,
}

#[derive(Debug, Deserialize)]
struct ProviderDate {
    #[serde(default)]
    hijri: Option<HijriDate>,
}

#[derive(Debug, Deserialize)]
struct Payload {
    timings: RawTimings,
    #[serde(default)]
    date: Option<ProviderDate>,
}

/// Response envelope. `data` is left untyped until the status code is
/// checked, because the provider puts an error string there on failure.
#[derive(Debug, Deserialize)]
struct Envelope {
    code: u32,
    #[serde(default)]
    data: serde_json::Value,
}

/// One successfully fetched and parsed day of data.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub timings: DailyTimings,
    /// Provider-reported Hijri date, e.g. "15 Muharram 1448", when present.
    pub hijri: Option<String>,
    pub city: String,
}

/// Fetch and parse today's timetable for the configured city.
///
/// One request, no retries. A failed fetch leaves whatever data the caller
/// already had in place.
pub fn fetch_timings(config: &Config) -> Result<FetchResult> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .context("failed to build HTTP client")?;

    let method = config.method().to_string();
    let response = client
        .get(PROVIDER_BASE_URL)
        .query(&[
            ("city", config.city()),
            ("country", config.country()),
            ("method", method.as_str()),
        ])
        .send()
        .with_context(|| format!("request to timings provider failed for {}", config.city()))?;

    let envelope: Envelope = response
        .json()
        .context("timings provider returned unparseable JSON")?;

    if envelope.code != 200 {
        return Err(anyhow!(
            "timings provider returned status {} for city '{}'",
            envelope.code,
            config.city()
        ));
    }

    let payload: Payload = serde_json::from_value(envelope.data)
        .context("timings provider returned an unexpected payload shape")?;

    parse_payload(payload, config.city().to_string())
}

fn parse_payload(payload: Payload, city: String) -> Result<FetchResult> {
    let timings = DailyTimings::try_from(&payload.timings)
        .context("timings payload contained a malformed timestamp")?;

    let hijri = payload.date.and_then(|d| d.hijri).map(|h| {
        let month = h.month.map(|m| m.en).unwrap_or_default();
        format!("{} {} {}", h.day, month, h.year)
    });

    Ok(FetchResult {
        timings,
        hijri,
        city,
    })
}

/// Dispatch a fetch on a background thread.
///
/// The result arrives on `tx` tagged with `generation`; the receiver discards
/// anything older than its current generation. The thread is detached, so an
/// abandoned in-flight request simply reports into a closed or superseded
/// channel and disappears.
pub fn spawn_fetch(config: Config, generation: u64, tx: Sender<(u64, Result<FetchResult>)>) {
    thread::spawn(move || {
        let result = fetch_timings(&config);
        let _ = tx.send((generation, result));
    });
}
