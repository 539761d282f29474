//! Chat message records.

use crate::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Distinguishes the seeded summary message from ordinary chat turns.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// An ordinary chat turn
    #[display("chat")]
    Chat,
    /// The session summary seeded as the first assistant message
    #[display("summary")]
    Summary,
}

impl MessageKind {
    /// Parse a stored kind string. Empty maps to `Chat`, matching rows
    /// written before the kind field existed.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "" | "chat" => Some(Self::Chat),
            "summary" => Some(Self::Summary),
            _ => None,
        }
    }
}

/// One chat turn owned by a session. Append-only, ordered by `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier
    pub id: Uuid,
    /// The owning session
    pub session_id: Uuid,
    /// Who authored the turn
    pub role: Role,
    /// Ordinary chat turn or seeded summary
    pub kind: MessageKind,
    /// The message text
    pub content: String,
    /// When the message was appended
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// An ordinary chat turn.
    pub fn chat(session_id: Uuid, role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            role,
            kind: MessageKind::Chat,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// The summary seed message for a session.
    ///
    /// Uses the deterministic id from [`summary_seed_id`] so duplicate
    /// pipeline runs collapse onto one row instead of racing a
    /// check-then-act emptiness probe.
    pub fn summary_seed(session_id: Uuid, summary: impl Into<String>) -> Self {
        Self {
            id: summary_seed_id(session_id),
            session_id,
            role: Role::Assistant,
            kind: MessageKind::Summary,
            content: summary.into(),
            created_at: Utc::now(),
        }
    }
}

/// Deterministic id for a session's summary seed message (UUIDv5 of the
/// session id). At most one seed row can exist per session.
pub fn summary_seed_id(session_id: Uuid) -> Uuid {
    Uuid::new_v5(&session_id, b"summary-seed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_id_is_deterministic_per_session() {
        let session = Uuid::new_v4();
        assert_eq!(summary_seed_id(session), summary_seed_id(session));
        assert_ne!(summary_seed_id(session), summary_seed_id(Uuid::new_v4()));
    }

    #[test]
    fn seed_message_is_assistant_summary() {
        let session = Uuid::new_v4();
        let seed = ChatMessage::summary_seed(session, "A narrative summary.");
        assert_eq!(seed.role, Role::Assistant);
        assert_eq!(seed.kind, MessageKind::Summary);
        assert_eq!(seed.id, summary_seed_id(session));
    }

    #[test]
    fn kind_parse_accepts_legacy_empty_string() {
        assert_eq!(MessageKind::parse(""), Some(MessageKind::Chat));
        assert_eq!(MessageKind::parse("summary"), Some(MessageKind::Summary));
        assert_eq!(MessageKind::parse("unknown"), None);
    }
}
