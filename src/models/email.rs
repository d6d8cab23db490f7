use crate::models::outcome::BookingOutcome;
use crate::models::window::BookingWindow;

/// The single plaintext mail sent at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeMessage {
    pub recipient: String,
    pub subject: &'static str,
    pub body: String,
}

impl OutcomeMessage {
    pub fn new(recipient: &str, outcome: BookingOutcome, window: &BookingWindow) -> Self {
        let body = format!(
            "Court booking for {} between {} and {}: {}.",
            window.date().format("%A %Y-%m-%d"),
            window.start().format("%-I:%M%p"),
            window.end().format("%-I:%M%p"),
            outcome
        );
        OutcomeMessage {
            recipient: recipient.to_string(),
            subject: outcome.subject(),
            body,
        }
    }
}
