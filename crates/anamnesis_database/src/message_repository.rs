//! PostgreSQL implementation of MessageRepository.

use crate::models::MessageRow;
use crate::schema::messages;
use anamnesis_core::ChatMessage;
use anamnesis_error::{AnamnesisResult, DatabaseError, DatabaseErrorKind};
use anamnesis_interface::MessageRepository;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// PostgreSQL implementation of MessageRepository using Diesel ORM.
pub struct PostgresMessageRepository {
    conn: Arc<Mutex<PgConnection>>,
}

impl PostgresMessageRepository {
    /// Create a new PostgreSQL message repository.
    pub fn new(conn: PgConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Create a repository from a shared connection.
    pub fn from_arc(conn: Arc<Mutex<PgConnection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    #[tracing::instrument(skip(self, message), fields(session_id = %message.session_id, role = %message.role))]
    async fn append(&self, message: &ChatMessage) -> AnamnesisResult<()> {
        let mut conn = self.conn.lock().await;

        diesel::insert_into(messages::table)
            .values(MessageRow::from(message))
            .execute(&mut *conn)
            .map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Write(format!(
                    "Failed to append message: {}",
                    e
                )))
            })?;

        Ok(())
    }

    #[tracing::instrument(skip(self, message), fields(session_id = %message.session_id))]
    async fn seed_summary(&self, message: &ChatMessage) -> AnamnesisResult<bool> {
        let mut conn = self.conn.lock().await;

        // The seed id is deterministic per session, so the uniqueness
        // constraint turns check-then-act into one conditional write
        let inserted = diesel::insert_into(messages::table)
            .values(MessageRow::from(message))
            .on_conflict(messages::id)
            .do_nothing()
            .execute(&mut *conn)
            .map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Write(format!(
                    "Failed to seed summary message: {}",
                    e
                )))
            })?;

        Ok(inserted > 0)
    }

    #[tracing::instrument(skip(self), fields(session_id = %session_id))]
    async fn list_for_session(&self, session_id: Uuid) -> AnamnesisResult<Vec<ChatMessage>> {
        let mut conn = self.conn.lock().await;

        let rows: Vec<MessageRow> = messages::table
            .filter(messages::session_id.eq(session_id))
            .order(messages::created_at.asc())
            .load(&mut *conn)
            .map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Query(format!(
                    "Failed to list messages: {}",
                    e
                )))
            })?;

        rows.into_iter()
            .map(|row| ChatMessage::try_from(row).map_err(Into::into))
            .collect()
    }
}
