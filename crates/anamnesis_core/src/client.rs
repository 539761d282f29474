//! Client records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A therapy client owning zero or more sessions.
///
/// `latest_summary` mirrors the most recent session summary. It is
/// overwritten unconditionally by each pipeline run, last-write-wins,
/// with no versioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Unique client identifier
    pub id: Uuid,
    /// The owning user
    pub user_id: String,
    /// Display name shown in the client list
    pub display_name: String,
    /// Denormalized copy of the most recent session summary
    pub latest_summary: Option<String>,
    /// When the client was created
    pub created_at: DateTime<Utc>,
    /// When the client was last modified
    pub updated_at: DateTime<Utc>,
}

impl ClientRecord {
    /// Create a new client with no summary.
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            display_name: display_name.into(),
            latest_summary: None,
            created_at: now,
            updated_at: now,
        }
    }
}
