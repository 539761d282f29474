//! Error types for the Anamnesis session pipeline.
//!
//! This crate provides the foundation error types used throughout the
//! Anamnesis workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use anamnesis_error::{AnamnesisResult, ConfigError};
//!
//! fn load_settings() -> AnamnesisResult<String> {
//!     Err(ConfigError::new("Missing field: database_url"))?
//! }
//!
//! match load_settings() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod database;
mod error;
mod models;
mod pipeline;
mod server;
mod storage;

pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{AnamnesisError, AnamnesisErrorKind, AnamnesisResult};
pub use models::{ModelsError, ModelsErrorKind};
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use server::{RejectionCode, ServerError, ServerErrorKind};
pub use storage::{StorageError, StorageErrorKind};
