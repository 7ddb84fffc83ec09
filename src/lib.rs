//! Turn class notification emails into calendar events.
//!
//! The pieces:
//! - `gemini` sends the text to the Gemini API and gets structured events back
//! - `gcal` builds per-event "Add to Google Calendar" links
//! - `ics` serializes a batch of events into one .ics file
//! - `state` tracks a parse session as an immutable value with explicit transitions

pub mod config;
pub mod error;
pub mod event;
pub mod gcal;
pub mod gemini;
pub mod ics;
pub mod state;

pub use error::ParseError;
pub use event::ParsedEvent;
