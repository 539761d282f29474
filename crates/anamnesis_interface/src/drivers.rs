//! Trait definitions for the external AI providers.

use anamnesis_core::{GenerateRequest, GenerateResponse, TranscriptRequest};
use anamnesis_error::AnamnesisResult;
use async_trait::async_trait;

/// Speech-to-text over a locally materialized audio file.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the audio file and return the raw text.
    ///
    /// Returns whatever the provider produced; emptiness policy belongs to
    /// the caller.
    async fn transcribe(&self, req: &TranscriptRequest) -> AnamnesisResult<String>;

    /// Provider name (e.g. "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g. "whisper-1").
    fn model_name(&self) -> &str;
}

/// Text generation grounded in the fixed reference corpus.
///
/// Implementations attach retrieval over the pre-indexed document set when
/// one is configured; the corpus is never mutated by this system.
#[async_trait]
pub trait NoteDriver: Send + Sync {
    /// Generate model output for the given prompt messages.
    async fn generate(&self, req: &GenerateRequest) -> AnamnesisResult<GenerateResponse>;

    /// Provider name (e.g. "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g. "gpt-4o-mini").
    fn model_name(&self) -> &str;
}
