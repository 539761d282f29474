//! Row models and conversions between rows and domain types.

use crate::schema::{clients, messages, sessions};
use anamnesis_core::{ChatMessage, ClientRecord, MessageKind, Role, SessionRecord, Stage};
use anamnesis_error::{DatabaseError, DatabaseErrorKind};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// A row of the `clients` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = clients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ClientRow {
    pub id: Uuid,
    pub user_id: String,
    pub display_name: String,
    pub latest_summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row of the `sessions` table.
///
/// Each stage occupies a column quartet; the tagged `Stage` is rebuilt from
/// it on read.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SessionRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub user_id: String,
    pub storage_path: String,
    pub transcript_status: String,
    pub transcript_text: Option<String>,
    pub transcript_error: Option<String>,
    pub transcript_completed_at: Option<DateTime<Utc>>,
    pub summary_status: String,
    pub summary_text: Option<String>,
    pub summary_error: Option<String>,
    pub summary_completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row of the `messages` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MessageRow {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: String,
    pub kind: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Split a stage into its column quartet: status, text, error,
/// completed_at.
pub(crate) fn stage_to_columns(
    stage: &Stage,
) -> (
    String,
    Option<String>,
    Option<String>,
    Option<DateTime<Utc>>,
) {
    match stage {
        Stage::Queued => ("queued".to_string(), None, None, None),
        Stage::Processing => ("processing".to_string(), None, None, None),
        Stage::Done { text, completed_at } => (
            "done".to_string(),
            Some(text.clone()),
            None,
            Some(*completed_at),
        ),
        Stage::Failed { error } => ("error".to_string(), None, Some(error.clone()), None),
    }
}

/// Rebuild a stage from its column quartet.
///
/// Accepts `pending` as a synonym for `queued` (rows written by the
/// original recorder used both spellings).
pub(crate) fn stage_from_columns(
    status: &str,
    text: Option<String>,
    error: Option<String>,
    completed_at: Option<DateTime<Utc>>,
) -> Result<Stage, DatabaseError> {
    match status {
        "queued" | "pending" => Ok(Stage::Queued),
        "processing" => Ok(Stage::Processing),
        "done" => {
            let text = text.ok_or_else(|| {
                DatabaseError::new(DatabaseErrorKind::RowConversion(
                    "Stage marked done without text".to_string(),
                ))
            })?;
            let completed_at = completed_at.ok_or_else(|| {
                DatabaseError::new(DatabaseErrorKind::RowConversion(
                    "Stage marked done without completion time".to_string(),
                ))
            })?;
            Ok(Stage::Done { text, completed_at })
        }
        "error" => {
            let error = error.ok_or_else(|| {
                DatabaseError::new(DatabaseErrorKind::RowConversion(
                    "Stage marked error without a message".to_string(),
                ))
            })?;
            Ok(Stage::Failed { error })
        }
        other => Err(DatabaseError::new(DatabaseErrorKind::RowConversion(
            format!("Unknown stage status: {}", other),
        ))),
    }
}

impl From<&ClientRecord> for ClientRow {
    fn from(client: &ClientRecord) -> Self {
        Self {
            id: client.id,
            user_id: client.user_id.clone(),
            display_name: client.display_name.clone(),
            latest_summary: client.latest_summary.clone(),
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}

impl From<ClientRow> for ClientRecord {
    fn from(row: ClientRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            display_name: row.display_name,
            latest_summary: row.latest_summary,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<&SessionRecord> for SessionRow {
    fn from(session: &SessionRecord) -> Self {
        let (transcript_status, transcript_text, transcript_error, transcript_completed_at) =
            stage_to_columns(&session.transcript);
        let (summary_status, summary_text, summary_error, summary_completed_at) =
            stage_to_columns(&session.summary);
        Self {
            id: session.id,
            client_id: session.client_id,
            user_id: session.user_id.clone(),
            storage_path: session.storage_path.clone(),
            transcript_status,
            transcript_text,
            transcript_error,
            transcript_completed_at,
            summary_status,
            summary_text,
            summary_error,
            summary_completed_at,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

impl TryFrom<SessionRow> for SessionRecord {
    type Error = DatabaseError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        let transcript = stage_from_columns(
            &row.transcript_status,
            row.transcript_text,
            row.transcript_error,
            row.transcript_completed_at,
        )?;
        let summary = stage_from_columns(
            &row.summary_status,
            row.summary_text,
            row.summary_error,
            row.summary_completed_at,
        )?;
        Ok(Self {
            id: row.id,
            client_id: row.client_id,
            user_id: row.user_id,
            storage_path: row.storage_path,
            transcript,
            summary,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<&ChatMessage> for MessageRow {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id,
            session_id: message.session_id,
            role: message.role.to_string(),
            kind: message.kind.to_string(),
            content: message.content.clone(),
            created_at: message.created_at,
        }
    }
}

impl TryFrom<MessageRow> for ChatMessage {
    type Error = DatabaseError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let role = Role::parse(&row.role).ok_or_else(|| {
            DatabaseError::new(DatabaseErrorKind::RowConversion(format!(
                "Unknown message role: {}",
                row.role
            )))
        })?;
        let kind = MessageKind::parse(&row.kind).ok_or_else(|| {
            DatabaseError::new(DatabaseErrorKind::RowConversion(format!(
                "Unknown message kind: {}",
                row.kind
            )))
        })?;
        Ok(Self {
            id: row.id,
            session_id: row.session_id,
            role,
            kind,
            content: row.content,
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_columns_round_trip() {
        let now = Utc::now();
        for stage in [
            Stage::Queued,
            Stage::Processing,
            Stage::done("transcript text".to_string(), now),
            Stage::failed("provider timeout"),
        ] {
            let (status, text, error, completed_at) = stage_to_columns(&stage);
            let rebuilt = stage_from_columns(&status, text, error, completed_at).unwrap();
            assert_eq!(rebuilt, stage);
        }
    }

    #[test]
    fn pending_reads_as_queued() {
        let stage = stage_from_columns("pending", None, None, None).unwrap();
        assert_eq!(stage, Stage::Queued);
    }

    #[test]
    fn done_without_text_is_rejected() {
        assert!(stage_from_columns("done", None, None, Some(Utc::now())).is_err());
        assert!(stage_from_columns("done", Some("t".into()), None, None).is_err());
    }

    #[test]
    fn error_without_message_is_rejected() {
        assert!(stage_from_columns("error", None, None, None).is_err());
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(stage_from_columns("paused", None, None, None).is_err());
    }
}
