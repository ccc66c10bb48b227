//! Chat lifecycle controller.
//!
//! `ChatController` is the state machine behind the chat surface. It
//! owns the current message list, the in-memory copy of the session
//! history, and the single-request-in-flight send cycle. It performs
//! no IO of its own besides the injected [`HistoryStore`]: the caller
//! dispatches the actual query and hands the outcome back through
//! [`ChatController::resolve`].

use super::history::SessionHistory;
use super::model::ChatSession;
use super::store::HistoryStore;
use crate::error::{BionexusError, Result};
use bionexus_types::Message;
use chrono::Utc;
use serde_json::Value;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, warn};

/// The fixed greeting every fresh chat starts with.
pub const WELCOME_TEXT: &str = "💊 Hello! How can I help you today?";

/// The fixed bot message substituted for a failed query.
pub const FALLBACK_TEXT: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";

/// A query accepted for dispatch.
///
/// The token is the id of the session the query was submitted from;
/// a response whose token no longer matches the active session is
/// discarded instead of leaking into another conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub token: i64,
    pub query: String,
}

/// Orchestrates user input, the send cycle, session switching, and
/// archival into the injected history store.
///
/// Exactly one session is current at a time; its messages never appear
/// in the history until explicitly archived by [`ChatController::new_chat`].
pub struct ChatController {
    store: Arc<dyn HistoryStore>,
    history: SessionHistory,
    messages: Vec<Message>,
    current_id: i64,
    pending: Option<i64>,
}

impl ChatController {
    /// Creates a controller with a fresh session and the history
    /// loaded from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn new(store: Arc<dyn HistoryStore>) -> Result<Self> {
        let history = store.load()?;
        Ok(Self {
            store,
            history,
            messages: vec![Message::bot_text(WELCOME_TEXT)],
            current_id: Utc::now().timestamp_millis(),
            pending: None,
        })
    }

    /// The current conversation, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The in-memory copy of the session history.
    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// The id of the current session.
    pub fn current_id(&self) -> i64 {
        self.current_id
    }

    /// Whether a query is in flight.
    pub fn is_awaiting(&self) -> bool {
        self.pending.is_some()
    }

    /// Accepts user input for dispatch.
    ///
    /// On success the user message is appended immediately and the
    /// returned [`PendingQuery`] must be resolved via
    /// [`ChatController::resolve`]. Returns `None` without appending
    /// anything when a query is already in flight or the input is
    /// empty/whitespace-only.
    pub fn submit(&mut self, input: &str) -> Option<PendingQuery> {
        let query = input.trim();
        if query.is_empty() || self.pending.is_some() {
            return None;
        }

        self.messages.push(Message::user(query));
        self.pending = Some(self.current_id);
        Some(PendingQuery {
            token: self.current_id,
            query: query.to_string(),
        })
    }

    /// Completes the send cycle for a previously submitted query.
    ///
    /// A successful outcome appends the payload as a bot message; a
    /// failure appends the fixed fallback text instead, so the user
    /// always sees exactly one bot message per submitted query. A
    /// stale token (the session changed since dispatch) discards the
    /// outcome entirely.
    pub fn resolve<E: Display>(&mut self, token: i64, outcome: std::result::Result<Value, E>) {
        if self.pending != Some(token) || self.current_id != token {
            debug!(token, "discarding response for an abandoned query");
            return;
        }
        self.pending = None;

        match outcome {
            Ok(payload) => self.messages.push(Message::bot_payload(payload)),
            Err(err) => {
                warn!(%err, "query failed, substituting fallback message");
                self.messages.push(Message::bot_text(FALLBACK_TEXT));
            }
        }
    }

    /// Archives the current session (when it holds more than the
    /// welcome message) and starts a fresh one.
    ///
    /// Archival prepends the session to the history, replacing any
    /// entry with the same id and truncating to the ten most recent,
    /// then mirrors the new history to the store synchronously.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails; the fresh session is
    /// started regardless.
    pub fn new_chat(&mut self) -> Result<()> {
        let save_result = if self.messages.len() > 1 {
            let session = ChatSession::from_messages(
                self.current_id,
                Utc::now().to_rfc3339(),
                std::mem::take(&mut self.messages),
            );
            self.history = self.history.archive(session);
            self.store.save(&self.history)
        } else {
            Ok(())
        };

        self.reset_current(next_session_id(self.current_id));
        save_result
    }

    /// Resets the current conversation to the welcome message without
    /// archiving. The session keeps its id.
    pub fn clear(&mut self) {
        self.messages = vec![Message::bot_text(WELCOME_TEXT)];
    }

    /// Replaces the current conversation with an archived session.
    ///
    /// Whatever was showing before the switch is not archived, and a
    /// query still in flight for it will be discarded on resolution.
    ///
    /// # Errors
    ///
    /// Returns [`BionexusError::NotFound`] if no archived session has
    /// the given id.
    pub fn select_session(&mut self, id: i64) -> Result<()> {
        let session = self
            .history
            .find(id)
            .ok_or_else(|| BionexusError::not_found("session", id.to_string()))?;

        self.messages = session.messages.clone();
        self.current_id = id;
        self.pending = None;
        Ok(())
    }

    fn reset_current(&mut self, id: i64) {
        self.messages = vec![Message::bot_text(WELCOME_TEXT)];
        self.current_id = id;
        self.pending = None;
    }
}

/// Picks a fresh session id. Ids are creation timestamps, so two
/// sessions created within the same millisecond would collide; nudge
/// forward past the previous id when that happens.
fn next_session_id(previous: i64) -> i64 {
    let now = Utc::now().timestamp_millis();
    if now > previous { now } else { previous + 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::MemoryHistoryStore;
    use serde_json::json;

    fn controller() -> (ChatController, Arc<MemoryHistoryStore>) {
        let store = Arc::new(MemoryHistoryStore::new());
        let controller = ChatController::new(store.clone()).unwrap();
        (controller, store)
    }

    #[test]
    fn test_fresh_controller_shows_only_welcome() {
        let (controller, _) = controller();

        assert_eq!(controller.messages().len(), 1);
        assert_eq!(
            controller.messages()[0].body.as_text(),
            Some(WELCOME_TEXT)
        );
        assert!(!controller.is_awaiting());
    }

    #[test]
    fn test_submit_appends_user_message_and_blocks_further_input() {
        let (mut controller, _) = controller();

        let pending = controller.submit("What is TP53?").unwrap();
        assert_eq!(pending.query, "What is TP53?");
        assert_eq!(pending.token, controller.current_id());
        assert_eq!(controller.messages().len(), 2);
        assert!(controller.is_awaiting());

        // A second submit while awaiting produces no message.
        assert!(controller.submit("another question").is_none());
        assert_eq!(controller.messages().len(), 2);
    }

    #[test]
    fn test_whitespace_submit_is_ignored() {
        let (mut controller, _) = controller();

        assert!(controller.submit("").is_none());
        assert!(controller.submit("   \t ").is_none());
        assert_eq!(controller.messages().len(), 1);
    }

    #[test]
    fn test_resolve_success_appends_exactly_one_bot_message() {
        let (mut controller, _) = controller();

        let pending = controller.submit("query").unwrap();
        controller.resolve::<String>(pending.token, Ok(json!({"answer": 42})));

        assert_eq!(controller.messages().len(), 3);
        assert_eq!(controller.messages()[2].sender, bionexus_types::Sender::Bot);
        assert!(!controller.is_awaiting());
    }

    #[test]
    fn test_resolve_failure_substitutes_fallback_text() {
        let (mut controller, _) = controller();

        let pending = controller.submit("query").unwrap();
        controller.resolve(pending.token, Err::<Value, _>("connection refused"));

        assert_eq!(controller.messages().len(), 3);
        assert_eq!(
            controller.messages()[2].body.as_text(),
            Some(FALLBACK_TEXT)
        );
        assert!(!controller.is_awaiting());
    }

    #[test]
    fn test_stale_token_is_discarded_after_new_chat() {
        let (mut controller, _) = controller();

        let pending = controller.submit("query").unwrap();
        controller.new_chat().unwrap();

        controller.resolve::<String>(pending.token, Ok(json!("late response")));

        // The late response never reaches the fresh session.
        assert_eq!(controller.messages().len(), 1);
        assert!(!controller.is_awaiting());
    }

    #[test]
    fn test_new_chat_archives_prior_session() {
        let (mut controller, store) = controller();
        let original_id = controller.current_id();

        let pending = controller.submit("What is TP53?").unwrap();
        controller.resolve::<String>(pending.token, Ok(json!("a tumor suppressor")));
        let archived_messages = controller.messages().to_vec();

        controller.new_chat().unwrap();

        let history = controller.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history.sessions()[0].id, original_id);
        assert_eq!(history.sessions()[0].messages, archived_messages);
        assert_ne!(controller.current_id(), original_id);
        assert_eq!(controller.messages().len(), 1);

        // The store mirrors the in-memory history synchronously.
        assert_eq!(store.snapshot(), *history);
    }

    #[test]
    fn test_new_chat_skips_welcome_only_session() {
        let (mut controller, store) = controller();

        controller.new_chat().unwrap();

        assert!(controller.history().is_empty());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_clear_resets_without_store_write() {
        let (mut controller, store) = controller();

        let pending = controller.submit("query").unwrap();
        controller.resolve::<String>(pending.token, Ok(json!("answer")));
        controller.clear();

        assert_eq!(controller.messages().len(), 1);
        assert_eq!(
            controller.messages()[0].body.as_text(),
            Some(WELCOME_TEXT)
        );
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_select_session_restores_messages_and_id() {
        let (mut controller, _) = controller();
        let original_id = controller.current_id();

        let pending = controller.submit("first question").unwrap();
        controller.resolve::<String>(pending.token, Ok(json!("first answer")));
        controller.new_chat().unwrap();

        controller.select_session(original_id).unwrap();

        assert_eq!(controller.current_id(), original_id);
        assert_eq!(controller.messages().len(), 3);
    }

    #[test]
    fn test_select_unknown_session_is_not_found() {
        let (mut controller, _) = controller();

        let result = controller.select_session(424242);
        assert!(matches!(result, Err(BionexusError::NotFound { .. })));
    }

    #[test]
    fn test_reselected_session_rearchives_under_original_id() {
        let (mut controller, _) = controller();
        let original_id = controller.current_id();

        let pending = controller.submit("first question").unwrap();
        controller.resolve::<String>(pending.token, Ok(json!("first answer")));
        controller.new_chat().unwrap();

        controller.select_session(original_id).unwrap();
        let pending = controller.submit("follow-up").unwrap();
        controller.resolve::<String>(pending.token, Ok(json!("more detail")));
        controller.new_chat().unwrap();

        // Overwritten in place, not duplicated.
        let history = controller.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history.sessions()[0].id, original_id);
        assert_eq!(history.sessions()[0].messages.len(), 5);
    }

    #[test]
    fn test_history_cap_drops_oldest() {
        let (mut controller, _) = controller();
        let mut ids = Vec::new();

        for n in 0..11 {
            ids.push(controller.current_id());
            let pending = controller.submit(&format!("question {}", n)).unwrap();
            controller.resolve::<String>(pending.token, Ok(json!("answer")));
            controller.new_chat().unwrap();
        }

        let history = controller.history();
        assert_eq!(history.len(), 10);
        assert!(history.find(ids[0]).is_none());
        assert_eq!(history.sessions()[0].id, ids[10]);
    }
}
