//! The session pipeline and its sibling operations.
//!
//! This crate orchestrates what happens after an audio upload lands:
//! transcription, retrieval-grounded summarization, and the fan-out of the
//! summary into the chat thread and the client profile. It also hosts the
//! chat-answer operation, account erasure, and in-memory repositories used
//! by tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod answer;
mod erasure;
mod executor;
mod memory;
mod prompts;

pub use answer::{AnswerService, ChatAnswerRequest};
pub use erasure::{ErasureReport, ErasureService};
pub use executor::{PipelineOutcome, SessionPipeline};
pub use memory::{MemoryIdentityStore, MemoryStore};
pub use prompts::{ANSWER_SYSTEM_PROMPT, SUMMARY_SYSTEM_PROMPT};
