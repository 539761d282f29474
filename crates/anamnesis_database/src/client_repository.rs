//! PostgreSQL implementation of ClientRepository.

use crate::models::ClientRow;
use crate::schema::clients;
use anamnesis_core::ClientRecord;
use anamnesis_error::{AnamnesisResult, DatabaseError, DatabaseErrorKind};
use anamnesis_interface::ClientRepository;
use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// PostgreSQL implementation of ClientRepository using Diesel ORM.
pub struct PostgresClientRepository {
    conn: Arc<Mutex<PgConnection>>,
}

impl PostgresClientRepository {
    /// Create a new PostgreSQL client repository.
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
impl ClientRepository for PostgresClientRepository {
    #[tracing::instrument(skip(self, client), fields(client_id = %client.id))]
    async fn create(&self, client: &ClientRecord) -> AnamnesisResult<()> {
        let mut conn = self.conn.lock().await;

        diesel::insert_into(clients::table)
            .values(ClientRow::from(client))
            .execute(&mut *conn)
            .map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Write(format!(
                    "Failed to insert client: {}",
                    e
                )))
            })?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(client_id = %client_id))]
    async fn get(&self, client_id: Uuid) -> AnamnesisResult<Option<ClientRecord>> {
        let mut conn = self.conn.lock().await;

        let row: Option<ClientRow> = clients::table
            .find(client_id)
            .first(&mut *conn)
            .optional()
            .map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Query(format!(
                    "Failed to load client {}: {}",
                    client_id, e
                )))
            })?;

        Ok(row.map(ClientRecord::from))
    }

    #[tracing::instrument(skip(self, summary), fields(client_id = %client_id))]
    async fn set_latest_summary(&self, client_id: Uuid, summary: &str) -> AnamnesisResult<()> {
        let mut conn = self.conn.lock().await;

        // Unconditional overwrite, last-write-wins
        diesel::update(clients::table.find(client_id))
            .set((
                clients::latest_summary.eq(summary),
                clients::updated_at.eq(Utc::now()),
            ))
            .execute(&mut *conn)
            .map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Write(format!(
                    "Failed to update latest summary: {}",
                    e
                )))
            })?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(uid = %uid))]
    async fn delete_for_user(&self, uid: &str) -> AnamnesisResult<u64> {
        let mut conn = self.conn.lock().await;

        // Sessions and messages follow via ON DELETE CASCADE
        let deleted = diesel::delete(clients::table.filter(clients::user_id.eq(uid)))
            .execute(&mut *conn)
            .map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Write(format!(
                    "Failed to delete user subtree: {}",
                    e
                )))
            })?;

        tracing::info!(uid = %uid, clients = deleted, "Deleted user's structured subtree");
        Ok(deleted as u64)
    }
}
