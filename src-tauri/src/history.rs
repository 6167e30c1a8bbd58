use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// One completed exchange: the user's prompt and the generated answer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Turn {
    pub user_query: String,
    pub bot_response: String,
}

/// Append-only conversation log for one app session.
///
/// Lives in Tauri managed state, so it sits behind a `Mutex` even though
/// submissions are strictly sequential. Nothing is persisted; the log is
/// discarded when the process exits.
pub struct SessionHistory {
    turns: Mutex<Vec<Turn>>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self {
            turns: Mutex::new(Vec::new()),
        }
    }

    /// Record one completed exchange at the end of the log.
    /// Empty strings are accepted; this cannot fail.
    pub fn append(&self, query: &str, answer: &str) {
        self.turns.lock().unwrap().push(Turn {
            user_query: query.to_string(),
            bot_response: answer.to_string(),
        });
    }

    /// Snapshot of the full history in insertion order, oldest first.
    pub fn all(&self) -> Vec<Turn> {
        self.turns.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.turns.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new()
    }
}
