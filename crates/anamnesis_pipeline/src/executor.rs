//! The upload-triggered session pipeline.

use crate::prompts::{SUMMARY_SYSTEM_PROMPT, summary_user_prompt};
use anamnesis_core::{
    ChatMessage, ChatTurn, GenerateRequest, ObjectFinalized, Role, SessionPath, SessionRecord,
    Stage, TranscriptRequest,
};
use anamnesis_error::{
    AnamnesisError, AnamnesisResult, ModelsError, ModelsErrorKind, PipelineError,
    PipelineErrorKind,
};
use anamnesis_interface::{
    ClientRepository, MessageRepository, NoteDriver, SessionRepository, Transcriber,
};
use anamnesis_storage::AudioStore;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// What one pipeline invocation did.
///
/// Skips are ordinary outcomes, not errors: the upload-event endpoint
/// reports them with a 200 so the object-store notifier never retries a
/// filtered path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The object name did not match the session-path schema
    UnmatchedPath,
    /// The path matched but no session record points at it
    NoSession,
    /// Both stages completed and the summary fanned out
    Completed,
    /// A stage or fan-out write failed; the failure was recorded
    Failed {
        /// The captured failure message
        error: String,
    },
}

impl PipelineOutcome {
    /// Short label reported by the upload-event endpoint.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnmatchedPath => "skipped-unmatched-path",
            Self::NoSession => "skipped-no-session",
            Self::Completed => "completed",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Drives a finalized audio upload through transcription, summarization,
/// and fan-out.
///
/// All collaborators are injected behind the interface traits, so tests run
/// the full pipeline against in-memory repositories and scripted drivers.
pub struct SessionPipeline {
    transcriber: Arc<dyn Transcriber>,
    driver: Arc<dyn NoteDriver>,
    store: Arc<dyn AudioStore>,
    sessions: Arc<dyn SessionRepository>,
    messages: Arc<dyn MessageRepository>,
    clients: Arc<dyn ClientRepository>,
    language: Option<String>,
}

impl SessionPipeline {
    /// Assemble a pipeline from its collaborators.
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        driver: Arc<dyn NoteDriver>,
        store: Arc<dyn AudioStore>,
        sessions: Arc<dyn SessionRepository>,
        messages: Arc<dyn MessageRepository>,
        clients: Arc<dyn ClientRepository>,
    ) -> Self {
        Self {
            transcriber,
            driver,
            store,
            sessions,
            messages,
            clients,
            language: None,
        }
    }

    /// Set the spoken-language hint passed to the transcriber.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Handle one finalized-object event.
    ///
    /// Unmatched paths and pathless sessions are skips with no record
    /// mutation. Once a matching session is found, both stages go to
    /// `Processing` before any external call; any later failure is caught
    /// here and written into whichever stages are not yet terminal.
    #[tracing::instrument(skip(self, event), fields(object = %event.name))]
    pub async fn handle_upload(&self, event: &ObjectFinalized) -> AnamnesisResult<PipelineOutcome> {
        let Some(path) = SessionPath::parse(&event.name) else {
            tracing::debug!(object = %event.name, "Object is not session audio, skipping");
            return Ok(PipelineOutcome::UnmatchedPath);
        };

        let session = self
            .sessions
            .find_by_storage_path(&path.uid, path.client_id, &event.name)
            .await?;
        let Some(session) = session else {
            tracing::warn!(object = %event.name, "No session record points at this object");
            return Ok(PipelineOutcome::NoSession);
        };

        self.sessions
            .set_transcript_stage(session.id, Stage::Processing)
            .await?;
        self.sessions
            .set_summary_stage(session.id, Stage::Processing)
            .await?;

        match self.run_stages(&session, &event.name).await {
            Ok(()) => {
                tracing::info!(session_id = %session.id, "Pipeline completed");
                Ok(PipelineOutcome::Completed)
            }
            Err(e) => {
                tracing::error!(session_id = %session.id, error = %e, "Pipeline failed");
                self.record_failure(session.id, &e).await;
                Ok(PipelineOutcome::Failed {
                    error: e.to_string(),
                })
            }
        }
    }

    /// Transcribe, summarize, and fan out. Completed work is never rolled
    /// back by a later failure.
    async fn run_stages(&self, session: &SessionRecord, object_name: &str) -> AnamnesisResult<()> {
        let transcript = self.transcribe(object_name).await?;
        self.sessions
            .set_transcript_stage(session.id, Stage::done(transcript.clone(), Utc::now()))
            .await?;

        let summary = self.summarize(&transcript).await?;
        self.sessions
            .set_summary_stage(session.id, Stage::done(summary.clone(), Utc::now()))
            .await?;

        self.fan_out(session, &summary).await
    }

    /// Materialize the audio locally and transcribe it. The guard removes
    /// the local copy on every exit path, including the error ones.
    async fn transcribe(&self, object_name: &str) -> AnamnesisResult<String> {
        let audio = self.store.fetch(object_name).await?;
        let mut request = TranscriptRequest::new(audio.path(), object_name);
        request.language = self.language.clone();

        let raw = self.transcriber.transcribe(&request).await?;
        drop(audio);

        let transcript = raw.trim();
        if transcript.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::EmptyTranscript).into());
        }
        Ok(transcript.to_string())
    }

    async fn summarize(&self, transcript: &str) -> AnamnesisResult<String> {
        let request = GenerateRequest::builder()
            .messages(vec![
                ChatTurn::new(Role::System, SUMMARY_SYSTEM_PROMPT),
                ChatTurn::new(Role::User, summary_user_prompt(transcript)),
            ])
            .max_output_tokens(1024u32)
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::RequestConversion(e.to_string())))?;

        let response = self.driver.generate(&request).await?;
        let summary = response.text.trim();
        if summary.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::EmptySummary).into());
        }
        Ok(summary.to_string())
    }

    /// Seed the chat thread and refresh the client profile. The seed
    /// carries a deterministic id, so a duplicate pipeline run lands on the
    /// existing row instead of inserting a second one.
    async fn fan_out(&self, session: &SessionRecord, summary: &str) -> AnamnesisResult<()> {
        let seeded = self
            .messages
            .seed_summary(&ChatMessage::summary_seed(session.id, summary))
            .await
            .map_err(|e| PipelineError::new(PipelineErrorKind::FanOut(e.to_string())))?;
        if !seeded {
            tracing::debug!(session_id = %session.id, "Summary seed already present");
        }

        self.clients
            .set_latest_summary(session.client_id, summary)
            .await
            .map_err(|e| PipelineError::new(PipelineErrorKind::FanOut(e.to_string())))?;

        Ok(())
    }

    /// Write the failure into whichever stages are still non-terminal.
    /// Best-effort: a failure to write the failure is only logged.
    async fn record_failure(&self, session_id: Uuid, error: &AnamnesisError) {
        let message = error.to_string();

        let current = match self.sessions.get(session_id).await {
            Ok(Some(session)) => session,
            Ok(None) => {
                tracing::warn!(session_id = %session_id, "Session vanished before failure write");
                return;
            }
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "Could not reload session for failure write");
                return;
            }
        };

        if !current.transcript.is_terminal() {
            if let Err(e) = self
                .sessions
                .set_transcript_stage(session_id, Stage::failed(&message))
                .await
            {
                tracing::warn!(session_id = %session_id, error = %e, "Failed to record transcript failure");
            }
        }
        if !current.summary.is_terminal() {
            if let Err(e) = self
                .sessions
                .set_summary_stage(session_id, Stage::failed(&message))
                .await
            {
                tracing::warn!(session_id = %session_id, error = %e, "Failed to record summary failure");
            }
        }
    }
}
