//! Application state for a parse-and-export session.
//!
//! A single immutable value moved through discrete transitions
//! (idle -> parsing -> success/error) instead of a bundle of mutable
//! variables. Each transition consumes the old state and returns the new one.

use crate::event::ParsedEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum ParsingStatus {
    Idle,
    Parsing,
    Success,
    Error,
}

/// Snapshot of the session: the raw input, where parsing stands, and what
/// came out of it.
#[derive(Debug, Clone)]
pub struct AppState {
    pub input_text: String,
    pub status: ParsingStatus,
    pub events: Vec<ParsedEvent>,
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            input_text: String::new(),
            status: ParsingStatus::Idle,
            events: Vec::new(),
            error_message: None,
        }
    }

    pub fn with_input(self, text: impl Into<String>) -> Self {
        AppState {
            input_text: text.into(),
            ..self
        }
    }

    /// Enter the parsing state, discarding any previous error.
    pub fn start_parsing(self) -> Self {
        AppState {
            status: ParsingStatus::Parsing,
            error_message: None,
            ..self
        }
    }

    /// Record a successful parse.
    pub fn parsed(self, events: Vec<ParsedEvent>) -> Self {
        AppState {
            status: ParsingStatus::Success,
            events,
            error_message: None,
            ..self
        }
    }

    /// Record a failed parse. The input text is kept so the user can retry.
    pub fn failed(self, message: impl Into<String>) -> Self {
        AppState {
            status: ParsingStatus::Error,
            error_message: Some(message.into()),
            ..self
        }
    }

    /// Reset everything back to idle.
    pub fn cleared(self) -> Self {
        AppState::new()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
