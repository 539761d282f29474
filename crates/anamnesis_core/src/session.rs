//! Session records.

use crate::Stage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded or uploaded audio session tied to a client.
///
/// Created by the recorder at upload time with both stages queued; mutated
/// exclusively by the pipeline afterwards. The status, result, and error of
/// each stage live together in the tagged [`Stage`] value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique session identifier
    pub id: Uuid,
    /// The owning user
    pub user_id: String,
    /// The owning client
    pub client_id: Uuid,
    /// Storage location of the raw audio object
    pub storage_path: String,
    /// Transcription stage
    pub transcript: Stage,
    /// Summarization stage
    pub summary: Stage,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// When the session was last modified
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Create a freshly uploaded session with both stages queued.
    pub fn queued(
        user_id: impl Into<String>,
        client_id: Uuid,
        storage_path: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            client_id,
            storage_path: storage_path.into(),
            transcript: Stage::Queued,
            summary: Stage::Queued,
            created_at: now,
            updated_at: now,
        }
    }
}
