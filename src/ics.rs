//! ICS calendar file generation.
//!
//! One VEVENT per parsed event, built line by line so the output matches the
//! RFC 5545 framing exactly: CRLF line endings, escaped text values, and no
//! raw newlines inside a logical line.

use crate::event::{format_compact_utc, ParsedEvent};
use chrono::{DateTime, NaiveDate, Utc};

const PRODID: &str = "-//schedcal//ScheduleParser//EN";

/// Appended to every event id so UIDs never collide with ones minted by
/// other tools.
const UID_SUFFIX: &str = "schedcal";

/// Encode a batch of events as a single calendar file.
///
/// An empty batch still yields a valid calendar (header and footer only).
/// DTSTAMP is the wall clock at encode time.
pub fn encode_calendar(events: &[ParsedEvent]) -> String {
    encode_calendar_at(events, Utc::now())
}

fn encode_calendar_at(events: &[ParsedEvent], dtstamp: DateTime<Utc>) -> String {
    let stamp = dtstamp.format("%Y%m%dT%H%M%SZ").to_string();

    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, &format!("PRODID:{}", PRODID));
    push_line(&mut out, "CALSCALE:GREGORIAN");
    push_line(&mut out, "METHOD:PUBLISH");

    for event in events {
        push_line(&mut out, "BEGIN:VEVENT");
        push_line(&mut out, &format!("UID:{}@{}", event.id, UID_SUFFIX));
        push_line(&mut out, &format!("DTSTAMP:{}", stamp));
        push_line(&mut out, &format!("DTSTART:{}", format_compact_utc(&event.start)));
        push_line(&mut out, &format!("DTEND:{}", format_compact_utc(&event.end)));
        push_line(&mut out, &format!("SUMMARY:{}", escape_text(&event.title)));

        if let Some(ref description) = event.description {
            push_line(&mut out, &format!("DESCRIPTION:{}", escape_text(description)));
        }
        if let Some(ref location) = event.location {
            push_line(&mut out, &format!("LOCATION:{}", escape_text(location)));
        }

        push_line(&mut out, "END:VEVENT");
    }

    out.push_str("END:VCALENDAR");
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push_str("\r\n");
}

/// Escape a text value per RFC 5545: backslash, semicolon, comma, and line
/// breaks all become backslash sequences. Backslash goes first so later
/// replacements don't double up.
fn escape_text(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
        .replace('\r', "\\n")
}

/// Conventional filename for a downloaded export, with the date embedded.
pub fn export_filename(date: NaiveDate) -> String {
    format!("schedule_export_{}.ics", date.format("%Y-%m-%d"))
}
