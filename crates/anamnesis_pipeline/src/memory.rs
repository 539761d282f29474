//! In-memory repositories.
//!
//! One shared store implements all three repository traits so the
//! cross-table behavior (cascading deletes, the seed's conditional insert)
//! can be exercised without a database.

use anamnesis_core::{ChatMessage, ClientRecord, SessionRecord, Stage};
use anamnesis_error::{AnamnesisResult, DatabaseError, DatabaseErrorKind};
use anamnesis_interface::{
    ClientRepository, IdentityStore, MessageRepository, SessionRepository,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use uuid::Uuid;

fn poisoned() -> DatabaseError {
    DatabaseError::new(DatabaseErrorKind::Connection("Lock poisoned".to_string()))
}

/// In-memory implementation of the repository traits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: RwLock<HashMap<Uuid, SessionRecord>>,
    messages: RwLock<HashMap<Uuid, ChatMessage>>,
    clients: RwLock<HashMap<Uuid, ClientRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn create(&self, session: &SessionRecord) -> AnamnesisResult<()> {
        let mut sessions = self.sessions.write().map_err(|_| poisoned())?;
        sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn get(&self, session_id: Uuid) -> AnamnesisResult<Option<SessionRecord>> {
        let sessions = self.sessions.read().map_err(|_| poisoned())?;
        Ok(sessions.get(&session_id).cloned())
    }

    async fn find_by_storage_path(
        &self,
        uid: &str,
        client_id: Uuid,
        object_name: &str,
    ) -> AnamnesisResult<Option<SessionRecord>> {
        let sessions = self.sessions.read().map_err(|_| poisoned())?;
        let found = sessions
            .values()
            .filter(|s| {
                s.user_id == uid && s.client_id == client_id && s.storage_path == object_name
            })
            .min_by_key(|s| s.created_at)
            .cloned();
        Ok(found)
    }

    async fn set_transcript_stage(&self, session_id: Uuid, stage: Stage) -> AnamnesisResult<()> {
        let mut sessions = self.sessions.write().map_err(|_| poisoned())?;
        let session = sessions.get_mut(&session_id).ok_or_else(|| {
            DatabaseError::new(DatabaseErrorKind::NotFound(format!(
                "Session {} not found",
                session_id
            )))
        })?;
        session.transcript = stage;
        session.updated_at = Utc::now();
        Ok(())
    }

    async fn set_summary_stage(&self, session_id: Uuid, stage: Stage) -> AnamnesisResult<()> {
        let mut sessions = self.sessions.write().map_err(|_| poisoned())?;
        let session = sessions.get_mut(&session_id).ok_or_else(|| {
            DatabaseError::new(DatabaseErrorKind::NotFound(format!(
                "Session {} not found",
                session_id
            )))
        })?;
        session.summary = stage;
        session.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn append(&self, message: &ChatMessage) -> AnamnesisResult<()> {
        let mut messages = self.messages.write().map_err(|_| poisoned())?;
        messages.insert(message.id, message.clone());
        Ok(())
    }

    async fn seed_summary(&self, message: &ChatMessage) -> AnamnesisResult<bool> {
        let mut messages = self.messages.write().map_err(|_| poisoned())?;
        if messages.contains_key(&message.id) {
            return Ok(false);
        }
        messages.insert(message.id, message.clone());
        Ok(true)
    }

    async fn list_for_session(&self, session_id: Uuid) -> AnamnesisResult<Vec<ChatMessage>> {
        let messages = self.messages.read().map_err(|_| poisoned())?;
        let mut listed: Vec<ChatMessage> = messages
            .values()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect();
        listed.sort_by_key(|m| (m.created_at, m.id));
        Ok(listed)
    }
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn create(&self, client: &ClientRecord) -> AnamnesisResult<()> {
        let mut clients = self.clients.write().map_err(|_| poisoned())?;
        clients.insert(client.id, client.clone());
        Ok(())
    }

    async fn get(&self, client_id: Uuid) -> AnamnesisResult<Option<ClientRecord>> {
        let clients = self.clients.read().map_err(|_| poisoned())?;
        Ok(clients.get(&client_id).cloned())
    }

    async fn set_latest_summary(&self, client_id: Uuid, summary: &str) -> AnamnesisResult<()> {
        let mut clients = self.clients.write().map_err(|_| poisoned())?;
        if let Some(client) = clients.get_mut(&client_id) {
            client.latest_summary = Some(summary.to_string());
            client.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete_for_user(&self, uid: &str) -> AnamnesisResult<u64> {
        let mut clients = self.clients.write().map_err(|_| poisoned())?;
        let mut sessions = self.sessions.write().map_err(|_| poisoned())?;
        let mut messages = self.messages.write().map_err(|_| poisoned())?;

        let before = clients.len();
        clients.retain(|_, c| c.user_id != uid);
        let removed = (before - clients.len()) as u64;

        let dead_sessions: HashSet<Uuid> = sessions
            .values()
            .filter(|s| s.user_id == uid)
            .map(|s| s.id)
            .collect();
        sessions.retain(|id, _| !dead_sessions.contains(id));
        messages.retain(|_, m| !dead_sessions.contains(&m.session_id));

        Ok(removed)
    }
}

/// In-memory identity provider.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    users: RwLock<HashSet<String>>,
}

impl MemoryIdentityStore {
    /// Create an empty identity store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user.
    pub fn add_user(&self, uid: impl Into<String>) {
        if let Ok(mut users) = self.users.write() {
            users.insert(uid.into());
        }
    }

    /// Whether the user's identity record still exists.
    pub fn has_user(&self, uid: &str) -> bool {
        self.users.read().map(|u| u.contains(uid)).unwrap_or(false)
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn delete_user(&self, uid: &str) -> AnamnesisResult<()> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        users.remove(uid);
        Ok(())
    }
}
