//! Session state for the banking prompt chain.
//!
//! A session is one conversation's accumulated memory: the message
//! transcript, the raw per-turn inputs, the cached stage outputs, and the
//! structured details extracted so far.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use std::fmt;

/// Role of a message in the session transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message in the session transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Builds a message stamped with the current time.
    pub fn now(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// How far the chain has progressed for a session.
///
/// Derived from which cached fields are populated, never stored directly.
/// `Resolved` still accepts further turns; there is no terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    New,
    Interpreted,
    CategoriesSuggested,
    CategoryLocked,
    Resolved,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::New => write!(f, "new"),
            SessionPhase::Interpreted => write!(f, "interpreted"),
            SessionPhase::CategoriesSuggested => write!(f, "categories_suggested"),
            SessionPhase::CategoryLocked => write!(f, "category_locked"),
            SessionPhase::Resolved => write!(f, "resolved"),
        }
    }
}

/// One conversation's accumulated memory.
///
/// `interpreted_intent`, `suggested_categories`, and `selected_category`
/// are write-once: populated by their stage on the first turn that reaches
/// it, then reused on every later turn. `context_data` only ever gains or
/// overwrites keys; nothing removes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub id: String,
    /// Append-only transcript; never truncated or reordered.
    pub message_history: Vec<ChatMessage>,
    /// Trimmed raw user inputs, one per processed turn.
    pub turn_history: Vec<String>,
    pub interpreted_intent: Option<String>,
    pub suggested_categories: Option<String>,
    pub selected_category: Option<String>,
    pub context_data: Map<String, Value>,
    /// Set once a resolution has been generated for this session.
    #[serde(default)]
    pub resolved: bool,
}

impl SessionState {
    /// Creates an empty session under the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message_history: Vec::new(),
            turn_history: Vec::new(),
            interpreted_intent: None,
            suggested_categories: None,
            selected_category: None,
            context_data: Map::new(),
            resolved: false,
        }
    }

    /// Appends a user message to the transcript.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.message_history
            .push(ChatMessage::now(MessageRole::User, content));
    }

    /// Appends an assistant message to the transcript.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.message_history
            .push(ChatMessage::now(MessageRole::Assistant, content));
    }

    pub fn message_count(&self) -> usize {
        self.message_history.len()
    }

    /// Current chain phase, derived from the cached stage outputs.
    pub fn phase(&self) -> SessionPhase {
        if self.resolved {
            SessionPhase::Resolved
        } else if self.selected_category.is_some() {
            SessionPhase::CategoryLocked
        } else if self.suggested_categories.is_some() {
            SessionPhase::CategoriesSuggested
        } else if self.interpreted_intent.is_some() {
            SessionPhase::Interpreted
        } else {
            SessionPhase::New
        }
    }
}
