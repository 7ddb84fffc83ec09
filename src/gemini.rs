//! Gemini-backed schedule parsing.
//!
//! This is the upstream collaborator that does the actual natural-language
//! work: free text in, structured events out. We send a prompt plus a JSON
//! response schema and trust the model's structured output; the only local
//! post-processing is assigning each event a fresh id.

use crate::error::ParseError;
use crate::event::ParsedEvent;
use serde::Deserialize;
use serde_json::json;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MODEL: &str = "gemini-2.5-flash";

pub struct GeminiParser {
    client: reqwest::Client,
    api_key: String,
}

impl GeminiParser {
    pub fn new(api_key: String) -> Self {
        GeminiParser {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Parse free-form schedule text into events.
    ///
    /// Any failure is terminal for this call; there are no retries.
    pub async fn parse_schedule(&self, text: &str) -> Result<Vec<ParsedEvent>, ParseError> {
        let url = format!("{}/{}:generateContent", API_BASE, MODEL);

        let body = json!({
            "contents": [{
                "parts": [{ "text": build_prompt(text) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ParseError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        let response: GenerateContentResponse = response.json().await?;
        let json_text = extract_text(&response)?;
        decode_events(&json_text)
    }
}

fn build_prompt(text: &str) -> String {
    format!(
        "Parse the following class schedule text into structured events.\n\
        The text contains multiple class entries.\n\
        The input usually includes a line with a date (e.g. 11/5) and a line with a full date (e.g. 2025年11月5日).\n\
        Use the full date year/month/day context.\n\
        Timezone is Asia/Taipei.\n\
        \n\
        Input Text:\n\
        {}",
        text
    )
}

/// Response schema sent to the model: an array of event objects with
/// title/start/end required and location/description optional.
fn response_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": {
                    "type": "STRING",
                    "description": "The name of the class (e.g., Emily 伸展瑜伽). Remove raw dates from title if redundant."
                },
                "start": {
                    "type": "STRING",
                    "description": "Start time in ISO 8601 format (YYYY-MM-DDTHH:mm:ss). Assume timezone is Asia/Taipei (GMT+8) unless specified."
                },
                "end": {
                    "type": "STRING",
                    "description": "End time in ISO 8601 format. If duration is not explicit, assume 1 hour."
                },
                "location": {
                    "type": "STRING",
                    "description": "The Zoom link URL."
                },
                "description": {
                    "type": "STRING",
                    "description": "Other details like Meeting ID and Password."
                }
            },
            "required": ["title", "start", "end"]
        }
    })
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Pull the JSON text out of the first candidate's first text part.
fn extract_text(response: &GenerateContentResponse) -> Result<String, ParseError> {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|content| content.parts.iter().find_map(|p| p.text.clone()))
        .ok_or_else(|| {
            ParseError::UnexpectedResponse("no text part in the first candidate".to_string())
        })
}

/// The event shape the model returns: everything except the identifier.
#[derive(Debug, Deserialize)]
struct RawEvent {
    title: String,
    start: String,
    end: String,
    location: Option<String>,
    description: Option<String>,
}

/// Decode the model's JSON array and assign each event a fresh id.
fn decode_events(json_text: &str) -> Result<Vec<ParsedEvent>, ParseError> {
    let raw: Vec<RawEvent> =
        serde_json::from_str(json_text).map_err(|e| ParseError::MalformedOutput(e.to_string()))?;

    Ok(raw
        .into_iter()
        .map(|e| ParsedEvent {
            id: uuid::Uuid::new_v4().to_string(),
            title: e.title,
            start: e.start,
            end: e.end,
            location: e.location,
            description: e.description,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL_OUTPUT: &str = r#"[
        {
            "title": "Emily 伸展瑜伽",
            "start": "2025-11-05T21:10:00",
            "end": "2025-11-05T22:00:00",
            "location": "https://zoom.example/j/123",
            "description": "會議ID: 886 6123 9954\n密碼: emily"
        },
        {
            "title": "Flow 瑜伽",
            "start": "2025-11-06T19:00:00",
            "end": "2025-11-06T20:00:00"
        }
    ]"#;

    #[test]
    fn test_decode_events_assigns_unique_ids() {
        let events = decode_events(MODEL_OUTPUT).expect("Should decode");
        assert_eq!(events.len(), 2);
        assert!(!events[0].id.is_empty());
        assert_ne!(events[0].id, events[1].id, "Each event gets its own id");
    }

    #[test]
    fn test_decode_events_preserves_fields() {
        let events = decode_events(MODEL_OUTPUT).expect("Should decode");
        assert_eq!(events[0].title, "Emily 伸展瑜伽");
        assert_eq!(events[0].start, "2025-11-05T21:10:00");
        assert_eq!(
            events[0].location.as_deref(),
            Some("https://zoom.example/j/123")
        );
        assert!(events[1].location.is_none());
        assert!(events[1].description.is_none());
    }

    #[test]
    fn test_decode_events_rejects_non_json() {
        let err = decode_events("Sorry, I could not parse that.").unwrap_err();
        assert!(
            matches!(err, ParseError::MalformedOutput(_)),
            "Non-JSON output should be a MalformedOutput error. Got: {:?}",
            err
        );
    }

    #[test]
    fn test_decode_events_rejects_missing_required_field() {
        let err = decode_events(r#"[{"title": "no times"}]"#).unwrap_err();
        assert!(matches!(err, ParseError::MalformedOutput(_)));
    }

    #[test]
    fn test_extract_text_from_response_body() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "parts": [{ "text": "[]" }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }"#;
        let response: GenerateContentResponse =
            serde_json::from_str(body).expect("Should deserialize");
        assert_eq!(extract_text(&response).expect("Should have text"), "[]");
    }

    #[test]
    fn test_extract_text_without_candidates_is_an_error() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{ "candidates": [] }"#).expect("Should deserialize");
        let err = extract_text(&response).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedResponse(_)));
    }

    #[test]
    fn test_empty_model_output_is_zero_events() {
        let events = decode_events("[]").expect("Should decode");
        assert!(events.is_empty());
    }
}
