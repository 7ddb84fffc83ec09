//! Google Calendar "add event" deep links.

use crate::event::{format_compact_utc, ParsedEvent};
use url::form_urlencoded;

const RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// Build a Google Calendar link that pre-fills the event creation form.
///
/// All parameter values go through standard URL query encoding; the
/// `dates` parameter carries both timestamps in compact UTC form.
pub fn google_calendar_link(event: &ParsedEvent) -> String {
    let dates = format!(
        "{}/{}",
        format_compact_utc(&event.start),
        format_compact_utc(&event.end)
    );

    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("action", "TEMPLATE");
    query.append_pair("text", &event.title);
    query.append_pair("dates", &dates);

    if let Some(ref description) = event.description {
        query.append_pair("details", description);
    }
    if let Some(ref location) = event.location {
        query.append_pair("location", location);
    }

    format!("{}?{}", RENDER_URL, query.finish())
}

/// Build links for a whole batch of events.
///
/// The caller decides how to present them (the original app opened one
/// browser window per link; here that iteration belongs to the caller).
pub fn google_calendar_links(events: &[ParsedEvent]) -> Vec<String> {
    events.iter().map(google_calendar_link).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_event() -> ParsedEvent {
        ParsedEvent {
            id: "e1".to_string(),
            title: "Emily 伸展瑜伽".to_string(),
            start: "2025-11-05T21:10:00+08:00".to_string(),
            end: "2025-11-05T22:00:00+08:00".to_string(),
            location: Some("https://zoom.example/j/123".to_string()),
            description: None,
        }
    }

    #[test]
    fn test_link_has_template_action_and_base_url() {
        let link = google_calendar_link(&make_test_event());
        assert!(
            link.starts_with("https://calendar.google.com/calendar/render?"),
            "Link should point at the render endpoint. Got: {}",
            link
        );
        assert!(link.contains("action=TEMPLATE"), "Missing action flag: {}", link);
    }

    #[test]
    fn test_dates_are_utc_shifted_and_encoded() {
        let link = google_calendar_link(&make_test_event());
        assert!(
            link.contains("dates=20251105T131000Z%2F20251105T140000Z"),
            "dates should be UTC-shifted with an encoded separator. Got: {}",
            link
        );
    }

    #[test]
    fn test_location_is_percent_encoded() {
        let link = google_calendar_link(&make_test_event());
        assert!(
            link.contains("location=https%3A%2F%2Fzoom.example%2Fj%2F123"),
            "Location should be query-encoded. Got: {}",
            link
        );
    }

    #[test]
    fn test_optional_params_are_omitted_when_absent() {
        let mut event = make_test_event();
        event.location = None;
        event.description = None;

        let link = google_calendar_link(&event);
        assert!(!link.contains("location="), "Should omit location: {}", link);
        assert!(!link.contains("details="), "Should omit details: {}", link);
    }

    #[test]
    fn test_description_becomes_details_param() {
        let mut event = make_test_event();
        event.description = Some("會議ID: 886".to_string());

        let link = google_calendar_link(&event);
        assert!(link.contains("details="), "Should carry details param: {}", link);
    }

    #[test]
    fn test_malformed_times_produce_sentinel_not_panic() {
        let mut event = make_test_event();
        event.start = "not a date".to_string();
        event.end = "also not a date".to_string();

        let link = google_calendar_link(&event);
        // "Invalid Date/Invalid Date", form-encoded
        assert!(
            link.contains("dates=Invalid+Date%2FInvalid+Date"),
            "Malformed input should surface the sentinel. Got: {}",
            link
        );
    }

    #[test]
    fn test_batch_links_one_per_event() {
        let events = vec![make_test_event(), make_test_event()];
        let links = google_calendar_links(&events);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0], links[1]);
    }
}
