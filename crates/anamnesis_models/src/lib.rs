//! External AI provider clients for Anamnesis.
//!
//! Two OpenAI API surfaces back the pipeline: speech-to-text
//! (`audio/transcriptions`, the [`WhisperClient`]) and grounded generation
//! (`responses` with the `file_search` tool over the fixed reference
//! corpus, the [`ResponsesClient`]). Both are plain reqwest clients with
//! serde DTOs; provider failures surface as typed errors with the response
//! body preserved.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dto;
mod responses;
mod whisper;

pub use dto::{
    ResponsesInputItem, ResponsesOutputContent, ResponsesOutputItem, ResponsesRequest,
    ResponsesResponse, ResponsesTool, TranscriptionResponse,
};
pub use responses::ResponsesClient;
pub use whisper::WhisperClient;

/// Default OpenAI API base URL.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
