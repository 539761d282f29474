//! Wire types for the OpenAI endpoints.

use serde::{Deserialize, Serialize};

/// Response body of `POST /audio/transcriptions`.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionResponse {
    /// The transcribed text
    pub text: String,
}

/// One input item for the Responses API.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesInputItem {
    /// "system", "user", or "assistant"
    pub role: String,
    /// The item's text
    pub content: String,
}

/// A tool attachment for the Responses API.
///
/// Only `file_search` over the fixed reference corpus is used here.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesTool {
    /// Tool type, always "file_search"
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Vector stores to search
    pub vector_store_ids: Vec<String>,
}

/// Request body of `POST /responses`.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesRequest {
    /// Model identifier
    pub model: String,
    /// Prompt items in conversation order
    pub input: Vec<ResponsesInputItem>,
    /// Retrieval tools, omitted when no corpus is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ResponsesTool>>,
    /// Output token cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// One content block inside a Responses output item.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesOutputContent {
    /// Content type; text lives under "output_text"
    #[serde(rename = "type")]
    pub content_type: String,
    /// The text, present for "output_text" blocks
    #[serde(default)]
    pub text: Option<String>,
}

/// One output item of a Responses API call.
///
/// Non-message items (e.g. `file_search_call`) carry no content.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesOutputItem {
    /// Item type; generated text lives under "message"
    #[serde(rename = "type")]
    pub item_type: String,
    /// Content blocks, present for "message" items
    #[serde(default)]
    pub content: Vec<ResponsesOutputContent>,
}

/// Response body of `POST /responses`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesResponse {
    /// Response identifier
    pub id: String,
    /// Output items in generation order
    #[serde(default)]
    pub output: Vec<ResponsesOutputItem>,
}

impl ResponsesResponse {
    /// Concatenate every `output_text` block across message items.
    pub fn output_text(&self) -> String {
        self.output
            .iter()
            .filter(|item| item.item_type == "message")
            .flat_map(|item| item.content.iter())
            .filter(|block| block.content_type == "output_text")
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }
}
