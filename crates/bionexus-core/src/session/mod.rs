//! Session domain module.
//!
//! This module contains the session domain model, the persisted
//! history list, the storage seam, and the chat lifecycle controller.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`ChatSession`)
//! - `history`: The capped, deduplicated history list (`SessionHistory`)
//! - `store`: Storage trait and implementations (`HistoryStore`)
//! - `controller`: Chat lifecycle state machine (`ChatController`)

mod controller;
mod history;
mod model;
mod store;

// Re-export public API
pub use controller::{ChatController, PendingQuery, FALLBACK_TEXT, WELCOME_TEXT};
pub use history::SessionHistory;
pub use model::ChatSession;
pub use store::{HistoryStore, JsonHistoryStore, MemoryHistoryStore};
