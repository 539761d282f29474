//! Anamnesis - session pipeline service for therapist clinical notes.
//!
//! Anamnesis receives finalized audio uploads, transcribes them, produces a
//! retrieval-grounded session summary, fans the summary out to the session's
//! chat thread and the owning client's profile, answers questions about a
//! session, and erases a user's data on request.
//!
//! # Architecture
//!
//! The workspace is organized as focused crates:
//!
//! - `anamnesis_core` - Domain types (sessions, stages, messages, paths)
//! - `anamnesis_interface` - Trait seams for drivers, repositories, identity
//! - `anamnesis_error` - Error types
//! - `anamnesis_storage` - Audio object storage
//! - `anamnesis_models` - OpenAI speech-to-text and Responses clients
//! - `anamnesis_database` - PostgreSQL persistence
//! - `anamnesis_pipeline` - The pipeline, chat answers, and erasure
//! - `anamnesis_server` - HTTP surface and configuration
//!
//! This crate (`anamnesis`) re-exports everything for convenience and
//! carries the service binary.

#![forbid(unsafe_code)]

pub use anamnesis_core::{
    ChatMessage, ChatTurn, ClientRecord, GenerateRequest, GenerateResponse, MessageKind,
    ObjectFinalized, Role, SessionPath, SessionRecord, Stage, TranscriptRequest, init_telemetry,
    shutdown_telemetry, summary_seed_id,
};
pub use anamnesis_database::{
    PostgresClientRepository, PostgresMessageRepository, PostgresSessionRepository, connect,
    establish_connection, run_migrations,
};
pub use anamnesis_error::{AnamnesisError, AnamnesisErrorKind, AnamnesisResult};
pub use anamnesis_interface::{
    ClientRepository, IdentityStore, MessageRepository, NoteDriver, SessionRepository,
    TokenVerifier, Transcriber,
};
pub use anamnesis_models::{ResponsesClient, WhisperClient};
pub use anamnesis_pipeline::{
    AnswerService, ChatAnswerRequest, ErasureService, PipelineOutcome, SessionPipeline,
};
pub use anamnesis_server::{AppConfig, AppState, StaticTokenVerifier, create_router, serve};
pub use anamnesis_storage::{AudioStore, FileSystemStore, TempAudio};
