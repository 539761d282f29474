//! HTTP surface for the session pipeline.
//!
//! Exposes the finalized-object event hook, the callable answer and erasure
//! endpoints, and a health probe. Callable endpoints authenticate a bearer
//! token through the [`anamnesis_interface::TokenVerifier`] seam; every
//! rejection carries a typed code in the `{code, message}` envelope.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod config;
mod reject;
mod server;

pub use auth::StaticTokenVerifier;
pub use config::{AppConfig, DatabaseSection, OpenAiSection, ServerSection, StorageSection};
pub use reject::ApiError;
pub use server::{AppState, create_router, serve};
