//! Session domain model.
//!
//! This module contains the core ChatSession entity that represents
//! one archived conversation in the application's domain layer.

use bionexus_types::Message;
use serde::{Deserialize, Serialize};

/// Maximum number of characters kept from the first exchange when
/// deriving a session title.
const TITLE_MAX_CHARS: usize = 30;

/// Represents one archived conversation.
///
/// A session contains:
/// - A creation-timestamp id (epoch milliseconds), which is both its
///   identity and its recency sort key
/// - The archival timestamp (ISO 8601 format)
/// - The ordered, append-only message list
/// - A short title derived from the first exchange
///
/// This is the "pure" domain model that the lifecycle logic operates
/// on, independent of any specific storage format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique session identifier (creation time, epoch milliseconds)
    pub id: i64,
    /// Timestamp when the session was archived (ISO 8601 format)
    pub timestamp: String,
    /// The conversation, oldest first
    pub messages: Vec<Message>,
    /// Human-readable session title
    pub title: String,
}

impl ChatSession {
    /// Builds an archived session from the current conversation.
    ///
    /// The title is taken from the first message after the welcome
    /// message, truncated to 30 characters plus an ellipsis.
    ///
    /// # Arguments
    ///
    /// * `id` - The session's creation-timestamp id
    /// * `archived_at` - Archival time, ISO 8601
    /// * `messages` - The full message list including the welcome message
    pub fn from_messages(id: i64, archived_at: String, messages: Vec<Message>) -> Self {
        let title = derive_title(&messages);
        Self {
            id,
            timestamp: archived_at,
            messages,
            title,
        }
    }
}

/// Derives a display title from the first exchange after the welcome
/// message. Falls back to "New Chat" when no textual message exists.
fn derive_title(messages: &[Message]) -> String {
    messages
        .get(1)
        .and_then(|message| message.body.as_text())
        .map(|text| {
            let truncated: String = text.chars().take(TITLE_MAX_CHARS).collect();
            format!("{}...", truncated)
        })
        .unwrap_or_else(|| "New Chat".to_string())
}
