//! Chat message types.
//!
//! A message carries either plain text or the structured JSON payload
//! returned by the analysis service. Messages are immutable once
//! appended to a session and are stored as an append-only sequence.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Message typed by the user.
    User,
    /// Message produced by the analysis service (or a local fallback).
    Bot,
}

/// The content of a message.
///
/// Bot messages may carry the raw structured response from the
/// analysis service rather than a string; the renderer decides how to
/// present either form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageBody {
    /// Plain text content.
    Text(String),
    /// A structured JSON payload from the analysis service.
    Structured(Value),
}

impl MessageBody {
    /// Returns the text content, rendering a structured payload as
    /// compact JSON.
    pub fn as_display_text(&self) -> String {
        match self {
            MessageBody::Text(text) => text.clone(),
            MessageBody::Structured(value) => value.to_string(),
        }
    }

    /// Returns the plain text if this body is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageBody::Text(text) => Some(text),
            MessageBody::Structured(_) => None,
        }
    }
}

/// A single message in a chat session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The message content.
    pub body: MessageBody,
    /// Who authored the message.
    pub sender: Sender,
}

impl Message {
    /// Creates a user message from plain text.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            body: MessageBody::Text(text.into()),
            sender: Sender::User,
        }
    }

    /// Creates a bot message from plain text.
    pub fn bot_text(text: impl Into<String>) -> Self {
        Self {
            body: MessageBody::Text(text.into()),
            sender: Sender::Bot,
        }
    }

    /// Creates a bot message carrying a structured payload.
    pub fn bot_payload(value: Value) -> Self {
        Self {
            body: MessageBody::Structured(value),
            sender: Sender::Bot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_serialization_round_trip() {
        let original = Message::user("What is the role of TP53 in cancer?");

        let json_string = serde_json::to_string(&original).unwrap();
        let deserialized: Message = serde_json::from_str(&json_string).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_structured_body_round_trip() {
        let original = Message::bot_payload(json!({
            "detailed_results": { "graph": { "summary": "two hubs" } }
        }));

        let json_string = serde_json::to_string(&original).unwrap();
        let deserialized: Message = serde_json::from_str(&json_string).unwrap();

        assert_eq!(original, deserialized);
        assert!(deserialized.body.as_text().is_none());
    }

    #[test]
    fn test_sender_wire_names() {
        let json_string = serde_json::to_string(&Sender::User).unwrap();
        assert_eq!(json_string, "\"user\"");
        let json_string = serde_json::to_string(&Sender::Bot).unwrap();
        assert_eq!(json_string, "\"bot\"");
    }
}
