//! PostgreSQL integration for Anamnesis.
//!
//! This crate provides the Diesel schema, row models, and repository
//! implementations persisting clients, sessions, and chat messages.
//!
//! The tagged [`anamnesis_core::Stage`] maps onto the original column
//! quartet per stage (`*_status`, `*_text`, `*_error`, `*_completed_at`);
//! the mapping is the one place where an inconsistent quartet can be
//! observed, and it is rejected there.

#![forbid(unsafe_code)]

mod client_repository;
mod connection;
mod message_repository;
mod models;
mod session_repository;

pub mod schema;

pub use client_repository::PostgresClientRepository;
pub use connection::{MIGRATIONS, connect, establish_connection, run_migrations};
pub use message_repository::PostgresMessageRepository;
pub use models::{ClientRow, MessageRow, SessionRow};
pub use session_repository::PostgresSessionRepository;
