//! Request and response types for the external AI calls.

use crate::Role;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One prompt message in a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who authored the turn
    pub role: Role,
    /// The turn's text
    pub content: String,
}

impl ChatTurn {
    /// Build a turn.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A text generation request.
///
/// # Examples
///
/// ```
/// use anamnesis_core::{ChatTurn, GenerateRequest, Role};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![ChatTurn::new(Role::User, "Summarize this session.")])
///     .build()
///     .unwrap();
/// assert_eq!(request.messages.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, Builder)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// The prompt messages to send
    pub messages: Vec<ChatTurn>,
    /// Maximum number of tokens to generate
    pub max_output_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Model identifier override
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Start building a request.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified generation response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Concatenated output text
    pub text: String,
}

/// A speech-to-text request over a locally materialized audio file.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptRequest {
    /// Path to the local audio file
    pub audio_path: PathBuf,
    /// Original object name, used for the upload filename
    pub object_name: String,
    /// Spoken-language hint passed to the provider
    pub language: Option<String>,
}

impl TranscriptRequest {
    /// Build a request with no language hint.
    pub fn new(audio_path: impl Into<PathBuf>, object_name: impl Into<String>) -> Self {
        Self {
            audio_path: audio_path.into(),
            object_name: object_name.into(),
            language: None,
        }
    }
}
