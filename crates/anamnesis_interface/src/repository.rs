//! Repository and identity trait definitions.

use anamnesis_core::{ChatMessage, ClientRecord, SessionRecord, Stage};
use anamnesis_error::AnamnesisResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence for session records.
///
/// The pipeline exclusively owns the stage fields after upload; the UI only
/// reads them. Every stage write also bumps `updated_at`.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert a new session record.
    async fn create(&self, session: &SessionRecord) -> AnamnesisResult<()>;

    /// Load a session by id.
    async fn get(&self, session_id: Uuid) -> AnamnesisResult<Option<SessionRecord>>;

    /// Find the session whose stored path equals the triggering object's
    /// path, within the owning client's sessions. First match only.
    async fn find_by_storage_path(
        &self,
        uid: &str,
        client_id: Uuid,
        object_name: &str,
    ) -> AnamnesisResult<Option<SessionRecord>>;

    /// Overwrite the transcription stage.
    async fn set_transcript_stage(&self, session_id: Uuid, stage: Stage) -> AnamnesisResult<()>;

    /// Overwrite the summarization stage.
    async fn set_summary_stage(&self, session_id: Uuid, stage: Stage) -> AnamnesisResult<()>;
}

/// Persistence for chat messages. Append-only.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a chat turn.
    async fn append(&self, message: &ChatMessage) -> AnamnesisResult<()>;

    /// Insert the summary seed message unless one already exists for the
    /// session. The seed carries a deterministic id, so this is a
    /// conditional write rather than a read-then-write race.
    ///
    /// Returns `true` if the seed was inserted, `false` if one was already
    /// present.
    async fn seed_summary(&self, message: &ChatMessage) -> AnamnesisResult<bool>;

    /// List a session's messages ordered by creation time.
    async fn list_for_session(&self, session_id: Uuid) -> AnamnesisResult<Vec<ChatMessage>>;
}

/// Persistence for client records.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Insert a new client record.
    async fn create(&self, client: &ClientRecord) -> AnamnesisResult<()>;

    /// Load a client by id.
    async fn get(&self, client_id: Uuid) -> AnamnesisResult<Option<ClientRecord>>;

    /// Overwrite the client's denormalized latest summary, last-write-wins.
    async fn set_latest_summary(&self, client_id: Uuid, summary: &str) -> AnamnesisResult<()>;

    /// Delete the user's whole structured subtree (clients and, by
    /// cascade, their sessions and messages). Returns the number of
    /// clients removed.
    async fn delete_for_user(&self, uid: &str) -> AnamnesisResult<u64>;
}

/// The external identity provider's user records.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Irreversibly delete the user's identity record.
    async fn delete_user(&self, uid: &str) -> AnamnesisResult<()>;
}

/// Verifies a caller's bearer token and resolves the owning user.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Resolve a bearer token to a user id, or `None` if unverifiable.
    async fn verify(&self, token: &str) -> AnamnesisResult<Option<String>>;
}
