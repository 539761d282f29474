//! Scripted drivers shared by the pipeline integration tests.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use anamnesis_core::{GenerateRequest, GenerateResponse, TranscriptRequest};
use anamnesis_error::{AnamnesisResult, ModelsError, ModelsErrorKind};
use anamnesis_interface::{NoteDriver, Transcriber};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A transcriber that returns a fixed result and counts invocations.
pub struct ScriptedTranscriber {
    output: Result<String, String>,
    calls: AtomicUsize,
}

impl ScriptedTranscriber {
    pub fn ok(text: &str) -> Self {
        Self {
            output: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn err(message: &str) -> Self {
        Self {
            output: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transcriber for ScriptedTranscriber {
    async fn transcribe(&self, _req: &TranscriptRequest) -> AnamnesisResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.output {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(ModelsError::new(ModelsErrorKind::Api {
                status: 500,
                message: message.clone(),
            })
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-stt"
    }
}

/// A note driver that returns a fixed result and counts invocations.
pub struct ScriptedDriver {
    output: Result<String, String>,
    calls: AtomicUsize,
}

impl ScriptedDriver {
    pub fn ok(text: &str) -> Self {
        Self {
            output: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn err(message: &str) -> Self {
        Self {
            output: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NoteDriver for ScriptedDriver {
    async fn generate(&self, _req: &GenerateRequest) -> AnamnesisResult<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.output {
            Ok(text) => Ok(GenerateResponse { text: text.clone() }),
            Err(message) => Err(ModelsError::new(ModelsErrorKind::Api {
                status: 500,
                message: message.clone(),
            })
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-notes"
    }
}
