//! Object storage backends for session audio.
//!
//! Audio objects are path-addressed by the storage-path schema
//! (`users/{uid}/clients/{clientId}/sessions/...`). The pipeline
//! materializes objects to local temporary files for the duration of one
//! invocation; the [`TempAudio`] guard removes the local copy on every exit
//! path.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod store;
mod temp;

pub use filesystem::FileSystemStore;
pub use store::{AudioStore, PrefixDeletion};
pub use temp::TempAudio;
