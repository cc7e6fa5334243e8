//! In-memory session registry.
//!
//! Sessions live in a [`DashMap`] keyed by id, each wrapped in its own
//! `tokio::sync::Mutex` so turns within one session serialize while
//! unrelated sessions proceed in parallel. Cloning the registry is
//! cheap and shares the same underlying map.
//!
//! Never hold a map guard across an await; look up the `Arc`, drop the
//! guard, then lock the session.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use tellerchain_types::session::SessionState;

/// Greeting seeded as the first assistant message of every session.
pub const GREETING: &str = "Hello! I'm your banking assistant. How can I help you today?";

/// A session shared between the registry and in-flight turns.
pub type SharedSession = Arc<Mutex<SessionState>>;

/// Registry of all live sessions. State is process-local; a restart
/// clears it.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<DashMap<String, SharedSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session under a fresh id and return both.
    ///
    /// Ids are UUIDv7 so registry dumps sort by creation time.
    pub fn create(&self) -> (String, SharedSession) {
        let id = Uuid::now_v7().to_string();
        let session = seeded(id.clone());
        self.sessions.insert(id.clone(), session.clone());
        tracing::info!(session_id = %id, "session created");
        (id, session)
    }

    /// Look up a session by id.
    pub fn get(&self, id: &str) -> Option<SharedSession> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    /// Look up a session, creating it under the caller's id if unknown.
    ///
    /// Chat clients may present an id this process has never seen, for
    /// example after a restart; we adopt the id rather than reject it.
    pub fn get_or_create(&self, id: &str) -> SharedSession {
        self.sessions
            .entry(id.to_string())
            .or_insert_with(|| {
                tracing::info!(session_id = %id, "adopting unknown session id");
                seeded(id.to_string())
            })
            .clone()
    }

    /// Remove a session. Returns `false` when the id was unknown.
    pub fn delete(&self, id: &str) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "session deleted");
        }
        removed
    }

    /// Ids of all live sessions, in no particular order.
    pub fn ids(&self) -> Vec<String> {
        self.sessions.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Fresh session state with the greeting already on the transcript.
fn seeded(id: String) -> SharedSession {
    let mut state = SessionState::new(id);
    state.push_assistant(GREETING);
    Arc::new(Mutex::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tellerchain_types::session::MessageRole;

    #[tokio::test]
    async fn test_create_seeds_greeting() {
        let registry = SessionRegistry::new();
        let (id, session) = registry.create();

        assert!(!id.is_empty());
        let state = session.lock().await;
        assert_eq!(state.id, id);
        assert_eq!(state.message_count(), 1);
        assert_eq!(state.message_history[0].role, MessageRole::Assistant);
        assert_eq!(state.message_history[0].content, GREETING);
    }

    #[tokio::test]
    async fn test_get_or_create_adopts_foreign_id() {
        let registry = SessionRegistry::new();
        let session = registry.get_or_create("client-supplied-17");

        assert!(registry.get("client-supplied-17").is_some());
        let state = session.lock().await;
        assert_eq!(state.id, "client-supplied-17");
        assert_eq!(state.message_history[0].content, GREETING);
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let registry = SessionRegistry::new();
        let first = registry.get_or_create("abc");
        let second = registry.get_or_create("abc");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_unknown_id() {
        let registry = SessionRegistry::new();
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn test_delete_removes_session() {
        let registry = SessionRegistry::new();
        let (id, _) = registry.create();

        assert!(registry.delete(&id));
        assert!(registry.get(&id).is_none());
        assert!(!registry.delete(&id));
    }

    #[test]
    fn test_ids_lists_live_sessions() {
        let registry = SessionRegistry::new();
        let (a, _) = registry.create();
        let (b, _) = registry.create();

        let mut ids = registry.ids();
        ids.sort();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_clones_share_state() {
        let registry = SessionRegistry::new();
        let clone = registry.clone();
        let (id, _) = registry.create();

        assert!(clone.get(&id).is_some());
        assert_eq!(clone.len(), 1);
    }

    #[test]
    fn test_minted_ids_are_unique() {
        let registry = SessionRegistry::new();
        let (first, _) = registry.create();
        let (second, _) = registry.create();
        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);
    }
}
