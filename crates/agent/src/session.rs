use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use smartshop_core::{Conversation, Turn};
use uuid::Uuid;

/// Lock-guarded, process-lifetime conversation store.
///
/// One coarse lock serializes all reads and mutations of the session map and
/// of every conversation's turn list. Sessions are never evicted: they live
/// until process restart, which is a deliberate simplicity trade-off and a
/// documented data-loss limitation, not a durability contract.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Conversation>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the existing conversation for a known session id, or
    /// allocates a fresh session seeded with the greeting exchange.
    pub fn resolve_or_create(&self, session_id: Option<&str>) -> (String, Conversation) {
        let mut sessions = self.guard();

        if let Some(id) = session_id {
            if let Some(conversation) = sessions.get(id) {
                return (id.to_string(), conversation.clone());
            }
        }

        let id = Uuid::new_v4().to_string();
        let conversation = Conversation::with_greeting();
        sessions.insert(id.clone(), conversation.clone());
        (id, conversation)
    }

    /// Appends a turn to a known session; unknown ids are ignored.
    pub fn append_turn(&self, session_id: &str, turn: Turn) {
        if let Some(conversation) = self.guard().get_mut(session_id) {
            conversation.push_turn(turn);
        }
    }

    pub fn get(&self, session_id: &str) -> Option<Conversation> {
        self.guard().get(session_id).cloned()
    }

    // A poisoned lock only means another thread panicked mid-append; the map
    // itself is still structurally sound, so recover the guard.
    fn guard(&self) -> MutexGuard<'_, HashMap<String, Conversation>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
