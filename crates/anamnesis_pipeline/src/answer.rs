//! The chat-answer operation.

use crate::prompts::{ANSWER_SYSTEM_PROMPT, answer_user_prompt};
use anamnesis_core::{ChatMessage, ChatTurn, GenerateRequest, Role};
use anamnesis_error::{
    AnamnesisResult, ModelsError, ModelsErrorKind, RejectionCode, ServerError,
};
use anamnesis_interface::{MessageRepository, NoteDriver, SessionRepository};
use std::sync::Arc;
use uuid::Uuid;

/// A caller's question about one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatAnswerRequest {
    /// The owning client
    pub client_id: Uuid,
    /// The session the question is about
    pub session_id: Uuid,
    /// The question text
    pub text: String,
}

/// Answers free-text questions about a session, grounded in its transcript
/// and summary.
pub struct AnswerService {
    sessions: Arc<dyn SessionRepository>,
    messages: Arc<dyn MessageRepository>,
    driver: Arc<dyn NoteDriver>,
}

impl AnswerService {
    /// Assemble the service from its collaborators.
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        messages: Arc<dyn MessageRepository>,
        driver: Arc<dyn NoteDriver>,
    ) -> Self {
        Self {
            sessions,
            messages,
            driver,
        }
    }

    /// Answer a question about a session on behalf of the given user.
    ///
    /// Validation happens before any write or external call: the question
    /// must be non-empty, the session must exist and belong to the caller
    /// and client, and its transcript must be done. The question is
    /// persisted before generation so its timestamp strictly precedes the
    /// answer's.
    #[tracing::instrument(skip(self, request), fields(session_id = %request.session_id))]
    pub async fn answer(&self, uid: &str, request: &ChatAnswerRequest) -> AnamnesisResult<String> {
        let question = request.text.trim();
        if question.is_empty() {
            return Err(ServerError::rejected(
                RejectionCode::InvalidArgument,
                "text is required",
            )
            .into());
        }

        let session = self
            .sessions
            .get(request.session_id)
            .await?
            .filter(|s| s.user_id == uid && s.client_id == request.client_id)
            .ok_or_else(|| {
                ServerError::rejected(RejectionCode::NotFound, "Session not found")
            })?;

        let Some(transcript) = session.transcript.text() else {
            return Err(ServerError::rejected(
                RejectionCode::FailedPrecondition,
                "Transcript is not ready",
            )
            .into());
        };

        self.messages
            .append(&ChatMessage::chat(session.id, Role::User, question))
            .await?;

        let generate = GenerateRequest::builder()
            .messages(vec![
                ChatTurn::new(Role::System, ANSWER_SYSTEM_PROMPT),
                ChatTurn::new(
                    Role::User,
                    answer_user_prompt(transcript, session.summary.text(), question),
                ),
            ])
            .max_output_tokens(800u32)
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::RequestConversion(e.to_string())))?;

        let response = self.driver.generate(&generate).await?;
        let answer = response.text.trim().to_string();

        self.messages
            .append(&ChatMessage::chat(session.id, Role::Assistant, &answer))
            .await?;

        Ok(answer)
    }
}
