//! The event type produced by the upstream schedule parser, plus the
//! date/time formatting shared by both export paths.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Time zone assumed for start/end strings that carry no explicit offset.
///
/// The upstream parser is prompted to emit Asia/Taipei local times, so a
/// bare `YYYY-MM-DDTHH:mm:ss` is interpreted in that zone.
pub const DEFAULT_TZ: Tz = chrono_tz::Asia::Taipei;

/// Sentinel emitted when a start/end string fails to parse as a date.
/// Mirrors the degenerate output of the formatting functions rather than
/// turning a bad timestamp into a hard error.
pub const INVALID_DATE: &str = "Invalid Date";

/// A single calendar event extracted from the notification text.
///
/// `start` and `end` are kept as the ISO 8601 strings the upstream parser
/// produced; they are only interpreted as points in time at format time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedEvent {
    /// Caller-assigned identifier, stable for the session
    pub id: String,
    pub title: String,
    /// ISO 8601, with or without an explicit offset
    pub start: String,
    /// ISO 8601; not validated to follow `start`
    pub end: String,
    /// Usually the Zoom link URL
    pub location: Option<String>,
    /// Extra details like meeting ID and password, may span multiple lines
    pub description: Option<String>,
}

/// Parse an ISO 8601 string into a UTC instant.
///
/// Strings with an explicit offset are honored; strings without one are
/// interpreted in [`DEFAULT_TZ`].
pub fn parse_event_time(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // No offset: treat as local time in the default zone
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()?;

    let local = DEFAULT_TZ.from_local_datetime(&naive).earliest()?;
    Some(local.with_timezone(&Utc))
}

/// Format an ISO 8601 string as a compact UTC timestamp (`YYYYMMDDTHHMMSSZ`).
///
/// Unparseable input yields the [`INVALID_DATE`] sentinel instead of an
/// error, so malformed upstream output degrades visibly in the export
/// rather than aborting it.
pub fn format_compact_utc(s: &str) -> String {
    match parse_event_time(s) {
        Some(dt) => dt.format("%Y%m%dT%H%M%SZ").to_string(),
        None => INVALID_DATE.to_string(),
    }
}
