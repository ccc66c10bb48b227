pub mod config;
pub mod error;
pub mod session;

// Re-export common error type
pub use error::BionexusError;

pub use config::ClientConfig;
pub use session::{
    ChatController, ChatSession, HistoryStore, JsonHistoryStore, MemoryHistoryStore, PendingQuery,
    SessionHistory, FALLBACK_TEXT, WELCOME_TEXT,
};
