//! The persisted session history list.

use super::model::ChatSession;
use serde::{Deserialize, Serialize};

/// An ordered list of archived sessions, most recent first.
///
/// The list is capped at [`SessionHistory::MAX_SESSIONS`] entries and
/// deduplicated by session id: archiving a session whose id is already
/// present replaces the existing entry rather than duplicating it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionHistory(Vec<ChatSession>);

impl SessionHistory {
    /// Maximum number of sessions retained in the history.
    pub const MAX_SESSIONS: usize = 10;

    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the archived sessions, most recent first.
    pub fn sessions(&self) -> &[ChatSession] {
        &self.0
    }

    /// Returns the number of archived sessions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no sessions are archived.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Finds an archived session by id.
    pub fn find(&self, id: i64) -> Option<&ChatSession> {
        self.0.iter().find(|session| session.id == id)
    }

    /// Produces a new history with `session` at the front.
    ///
    /// This is the only mutation operator and it is pure: any existing
    /// entry with the same id is dropped, then the result is truncated
    /// to the most recent [`SessionHistory::MAX_SESSIONS`] entries.
    #[must_use]
    pub fn archive(&self, session: ChatSession) -> Self {
        let mut sessions = Vec::with_capacity(self.0.len() + 1);
        let id = session.id;
        sessions.push(session);
        sessions.extend(self.0.iter().filter(|s| s.id != id).cloned());
        sessions.truncate(Self::MAX_SESSIONS);
        Self(sessions)
    }
}
