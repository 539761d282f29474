//! Core data types for the Anamnesis session pipeline.
//!
//! This crate provides the foundation data types used across the workspace:
//! session, client, and chat-message records, the per-stage state machine,
//! the storage-path schema, and the generation request/response types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod event;
mod message;
mod path;
mod request;
mod role;
mod session;
mod stage;
mod telemetry;

pub use client::ClientRecord;
pub use event::ObjectFinalized;
pub use message::{ChatMessage, MessageKind, summary_seed_id};
pub use path::SessionPath;
pub use request::{
    ChatTurn, GenerateRequest, GenerateRequestBuilder, GenerateResponse, TranscriptRequest,
};
pub use role::Role;
pub use session::SessionRecord;
pub use stage::Stage;
pub use telemetry::{init_telemetry, shutdown_telemetry};
