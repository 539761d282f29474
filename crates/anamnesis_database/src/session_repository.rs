//! PostgreSQL implementation of SessionRepository.

use crate::models::{SessionRow, stage_to_columns};
use crate::schema::sessions;
use anamnesis_core::{SessionRecord, Stage};
use anamnesis_error::{AnamnesisResult, DatabaseError, DatabaseErrorKind};
use anamnesis_interface::SessionRepository;
use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// PostgreSQL implementation of SessionRepository using Diesel ORM.
pub struct PostgresSessionRepository {
    /// Database connection wrapped in Arc<Mutex> for async safety.
    conn: Arc<Mutex<PgConnection>>,
}

impl PostgresSessionRepository {
    /// Create a new PostgreSQL session repository.
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
impl SessionRepository for PostgresSessionRepository {
    #[tracing::instrument(skip(self, session), fields(session_id = %session.id))]
    async fn create(&self, session: &SessionRecord) -> AnamnesisResult<()> {
        let mut conn = self.conn.lock().await;

        diesel::insert_into(sessions::table)
            .values(SessionRow::from(session))
            .execute(&mut *conn)
            .map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Write(format!(
                    "Failed to insert session: {}",
                    e
                )))
            })?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(session_id = %session_id))]
    async fn get(&self, session_id: Uuid) -> AnamnesisResult<Option<SessionRecord>> {
        let mut conn = self.conn.lock().await;

        let row: Option<SessionRow> = sessions::table
            .find(session_id)
            .first(&mut *conn)
            .optional()
            .map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Query(format!(
                    "Failed to load session {}: {}",
                    session_id, e
                )))
            })?;

        row.map(SessionRecord::try_from)
            .transpose()
            .map_err(Into::into)
    }

    #[tracing::instrument(skip(self), fields(uid = %uid, client_id = %client_id, object = %object_name))]
    async fn find_by_storage_path(
        &self,
        uid: &str,
        client_id: Uuid,
        object_name: &str,
    ) -> AnamnesisResult<Option<SessionRecord>> {
        let mut conn = self.conn.lock().await;

        // First match only; a duplicate path is a pre-existing ambiguity
        let row: Option<SessionRow> = sessions::table
            .filter(sessions::user_id.eq(uid))
            .filter(sessions::client_id.eq(client_id))
            .filter(sessions::storage_path.eq(object_name))
            .order(sessions::created_at.asc())
            .first(&mut *conn)
            .optional()
            .map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Query(format!(
                    "Failed to find session by path: {}",
                    e
                )))
            })?;

        row.map(SessionRecord::try_from)
            .transpose()
            .map_err(Into::into)
    }

    #[tracing::instrument(skip(self, stage), fields(session_id = %session_id, status = stage.status_label()))]
    async fn set_transcript_stage(&self, session_id: Uuid, stage: Stage) -> AnamnesisResult<()> {
        let mut conn = self.conn.lock().await;
        let (status, text, error, completed_at) = stage_to_columns(&stage);

        diesel::update(sessions::table.find(session_id))
            .set((
                sessions::transcript_status.eq(status),
                sessions::transcript_text.eq(text),
                sessions::transcript_error.eq(error),
                sessions::transcript_completed_at.eq(completed_at),
                sessions::updated_at.eq(Utc::now()),
            ))
            .execute(&mut *conn)
            .map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Write(format!(
                    "Failed to update transcript stage: {}",
                    e
                )))
            })?;

        Ok(())
    }

    #[tracing::instrument(skip(self, stage), fields(session_id = %session_id, status = stage.status_label()))]
    async fn set_summary_stage(&self, session_id: Uuid, stage: Stage) -> AnamnesisResult<()> {
        let mut conn = self.conn.lock().await;
        let (status, text, error, completed_at) = stage_to_columns(&stage);

        diesel::update(sessions::table.find(session_id))
            .set((
                sessions::summary_status.eq(status),
                sessions::summary_text.eq(text),
                sessions::summary_error.eq(error),
                sessions::summary_completed_at.eq(completed_at),
                sessions::updated_at.eq(Utc::now()),
            ))
            .execute(&mut *conn)
            .map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Write(format!(
                    "Failed to update summary stage: {}",
                    e
                )))
            })?;

        Ok(())
    }
}
