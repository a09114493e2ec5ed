//! # Conversation Store
//!
//! In-memory session state, keyed by conversation id. The store is the only
//! shared mutable state in the system: every operation takes the single map
//! lock for the duration of one call, and callers always receive clones,
//! never references into the map. Sessions are created lazily on first
//! contact and removed only by [`ConversationStore::sweep`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Upper bound on retained history per session. Bounds both memory use and
/// the prompt size downstream.
pub const MAX_TURNS: usize = 10;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One recorded message in a conversation. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A caller-facing copy of a session's state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub user_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub messages: Vec<Turn>,
}

#[derive(Debug, Clone)]
struct Session {
    user_name: Option<String>,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
    messages: Vec<Turn>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            user_name: None,
            created_at: now,
            last_activity: now,
            messages: Vec::new(),
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user_name: self.user_name.clone(),
            created_at: self.created_at,
            last_activity: self.last_activity,
            messages: self.messages.clone(),
        }
    }
}

/// Thread-safe map of conversation id to session.
#[derive(Debug, Default)]
pub struct ConversationStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        self.sessions.lock().expect("conversation store lock poisoned")
    }

    /// Returns the session for `id`, creating it if absent. Touching a
    /// session refreshes its activity timestamp.
    pub fn get_or_create(&self, id: &str) -> SessionSnapshot {
        let now = Utc::now();
        let mut sessions = self.lock();
        let session = sessions
            .entry(id.to_string())
            .or_insert_with(|| Session::new(now));
        session.last_activity = now;
        session.snapshot()
    }

    /// Records the visitor's name. No-op if the session is unknown.
    pub fn set_name(&self, id: &str, name: &str) {
        let mut sessions = self.lock();
        if let Some(session) = sessions.get_mut(id) {
            session.user_name = Some(name.to_string());
            session.last_activity = Utc::now();
        }
    }

    /// Appends a turn and truncates history to the most recent
    /// [`MAX_TURNS`]. No-op if the session is unknown.
    pub fn append_turn(&self, id: &str, role: Role, content: &str) {
        let now = Utc::now();
        let mut sessions = self.lock();
        if let Some(session) = sessions.get_mut(id) {
            session.messages.push(Turn {
                role,
                content: content.to_string(),
                timestamp: now,
            });
            if session.messages.len() > MAX_TURNS {
                let excess = session.messages.len() - MAX_TURNS;
                session.messages.drain(..excess);
            }
            session.last_activity = now;
        }
    }

    /// Returns up to `limit` most recent turns, oldest first. Empty if the
    /// session is unknown.
    pub fn recent_turns(&self, id: &str, limit: usize) -> Vec<Turn> {
        let sessions = self.lock();
        match sessions.get(id) {
            Some(session) => {
                let skip = session.messages.len().saturating_sub(limit);
                session.messages[skip..].to_vec()
            }
            None => Vec::new(),
        }
    }

    /// A full read-only view of the session, or `None` if unknown.
    pub fn snapshot(&self, id: &str) -> Option<SessionSnapshot> {
        self.lock().get(id).map(Session::snapshot)
    }

    /// Removes every session idle for at least `max_age` and returns how
    /// many were removed. Intended to run from a periodic task, never from
    /// a request path.
    pub fn sweep(&self, max_age: Duration) -> usize {
        let now = Utc::now();
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, session| now - session.last_activity < max_age);
        before - sessions.len()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
