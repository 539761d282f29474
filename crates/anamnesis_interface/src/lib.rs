//! Trait definitions for the Anamnesis session pipeline.
//!
//! This crate provides the seams between the pipeline and its
//! collaborators: the AI providers, the record repositories, and the
//! identity provider. Implementations live in `anamnesis_models`,
//! `anamnesis_database`, and the in-memory fakes in `anamnesis_pipeline`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod drivers;
mod repository;

pub use drivers::{NoteDriver, Transcriber};
pub use repository::{
    ClientRepository, IdentityStore, MessageRepository, SessionRepository, TokenVerifier,
};
