//! Error types for the upstream parsing seam.

use thiserror::Error;

/// Failures from the text-to-events parser.
///
/// Callers surface these as a single generic message; the variants exist so
/// tests and logs can tell what actually went wrong.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("request to the language model failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("language model returned status {status}: {body}")]
    ApiStatus { status: u16, body: String },

    #[error("model response did not match the expected structure: {0}")]
    UnexpectedResponse(String),

    #[error("model output was not a valid event list: {0}")]
    MalformedOutput(String),
}
