//! Session history persistence.
//!
//! The history store is an injected seam so that the lifecycle logic
//! never touches a hidden storage location directly and tests can swap
//! in an in-memory implementation.

use super::history::SessionHistory;
use crate::config::ClientConfig;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// An abstract store for the persisted session history.
///
/// Implementations persist the whole list at once: the in-memory copy
/// held by the controller is the source of truth for the current
/// render, and `save` mirrors it synchronously on every archival.
/// There is no partial-write protection and the last writer wins.
pub trait HistoryStore: Send + Sync {
    /// Reads the persisted history.
    ///
    /// Returns an empty history when nothing has been persisted yet or
    /// when the persisted content is malformed; malformed content is
    /// not repaired.
    fn load(&self) -> Result<SessionHistory>;

    /// Overwrites the persisted history with the given list.
    fn save(&self, history: &SessionHistory) -> Result<()>;
}

/// File-backed history store.
///
/// The entire history is kept in a single `history.json` file:
///
/// ```text
/// base_dir/
/// ├── config.toml      # optional client configuration
/// └── history.json     # the serialized session history (<= 10 sessions)
/// ```
///
/// There is no schema version field; a future incompatible shape is
/// not migrated, only ignored on load.
pub struct JsonHistoryStore {
    base_dir: PathBuf,
}

impl JsonHistoryStore {
    /// Creates a store rooted at the given base directory, creating
    /// the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Creates a store at the default location (`~/.bionexus`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or
    /// the directory cannot be created.
    pub fn default_location() -> Result<Self> {
        Self::new(ClientConfig::default_data_dir()?)
    }

    fn history_file_path(&self) -> PathBuf {
        self.base_dir.join("history.json")
    }
}

impl HistoryStore for JsonHistoryStore {
    fn load(&self) -> Result<SessionHistory> {
        let path = self.history_file_path();
        if !path.exists() {
            return Ok(SessionHistory::new());
        }

        let raw = fs::read_to_string(&path)?;
        match serde_json::from_str(&raw) {
            Ok(history) => Ok(history),
            Err(err) => {
                warn!(path = %path.display(), %err, "malformed history file, starting empty");
                Ok(SessionHistory::new())
            }
        }
    }

    fn save(&self, history: &SessionHistory) -> Result<()> {
        let path = self.history_file_path();
        let json = serde_json::to_string_pretty(history)?;
        fs::write(&path, json)?;
        Ok(())
    }
}

/// In-memory history store.
///
/// Used as a stand-in for the file-backed store in tests and whenever
/// no writable data directory is available.
#[derive(Default)]
pub struct MemoryHistoryStore {
    history: Mutex<SessionHistory>,
}

impl MemoryHistoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given history.
    pub fn with_history(history: SessionHistory) -> Self {
        Self {
            history: Mutex::new(history),
        }
    }

    /// Returns a snapshot of the stored history.
    pub fn snapshot(&self) -> SessionHistory {
        self.history
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<SessionHistory> {
        Ok(self.snapshot())
    }

    fn save(&self, history: &SessionHistory) -> Result<()> {
        let mut guard = self
            .history
            .lock()
            .map_err(|_| crate::error::BionexusError::internal("history lock poisoned"))?;
        *guard = history.clone();
        Ok(())
    }
}
