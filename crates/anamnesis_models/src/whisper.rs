//! OpenAI speech-to-text client.

use crate::{OPENAI_API_BASE, dto::TranscriptionResponse};
use anamnesis_core::TranscriptRequest;
use anamnesis_error::{AnamnesisResult, ModelsError, ModelsErrorKind};
use anamnesis_interface::Transcriber;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use tracing::{debug, error, instrument};

/// OpenAI `audio/transcriptions` client.
#[derive(Debug, Clone)]
pub struct WhisperClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl WhisperClient {
    /// Creates a new speech-to-text client against the public OpenAI API.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `model` - Model identifier (e.g. "whisper-1")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(api_key, model, OPENAI_API_BASE)
    }

    /// Creates a client against an alternate base URL (proxies, test
    /// servers).
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        debug!("Creating new Whisper client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// Build the multipart form for one transcription request.
    async fn build_form(&self, req: &TranscriptRequest) -> Result<Form, ModelsError> {
        let bytes = tokio::fs::read(&req.audio_path).await.map_err(|e| {
            ModelsError::new(ModelsErrorKind::AudioRead(format!(
                "{}: {}",
                req.audio_path.display(),
                e
            )))
        })?;

        let filename = std::path::Path::new(&req.object_name)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio".to_string());

        let mut form = Form::new()
            .part("file", Part::bytes(bytes).file_name(filename))
            .text("model", self.model.clone());

        if let Some(language) = &req.language {
            form = form.text("language", language.clone());
        }

        Ok(form)
    }
}

#[async_trait::async_trait]
impl Transcriber for WhisperClient {
    #[instrument(skip(self, req), fields(provider = "openai", model = %self.model, object = %req.object_name))]
    async fn transcribe(&self, req: &TranscriptRequest) -> AnamnesisResult<String> {
        debug!("Sending transcription request");

        let form = self.build_form(req).await?;
        let url = format!("{}/audio/transcriptions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send transcription request");
                ModelsError::new(ModelsErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Transcription API returned error");
            return Err(ModelsError::new(ModelsErrorKind::Api {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        let transcription: TranscriptionResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse transcription response");
            ModelsError::new(ModelsErrorKind::Parse(e.to_string()))
        })?;

        debug!(
            chars = transcription.text.len(),
            "Received transcription response"
        );
        Ok(transcription.text)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
