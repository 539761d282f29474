//! Storage trait definition.

use crate::TempAudio;
use anamnesis_error::AnamnesisResult;

/// Outcome of a prefix deletion.
///
/// Per-object failures are swallowed so one bad object does not block the
/// rest; they are counted here and logged by the implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrefixDeletion {
    /// Objects removed
    pub deleted: u64,
    /// Objects that could not be removed
    pub failed: u64,
}

/// Trait for pluggable audio object storage backends.
#[async_trait::async_trait]
pub trait AudioStore: Send + Sync {
    /// Store an object under its full object name.
    async fn put(&self, object_name: &str, data: &[u8]) -> AnamnesisResult<()>;

    /// Materialize an object to a local temporary file.
    ///
    /// The returned guard deletes the local copy when dropped, so the
    /// temporary artifact is cleaned up on success, handled failure, and
    /// unwind alike.
    async fn fetch(&self, object_name: &str) -> AnamnesisResult<TempAudio>;

    /// Delete every object under a prefix.
    ///
    /// Individual deletion failures are logged and counted, never
    /// escalated; the call itself fails only if the prefix cannot be
    /// enumerated at all.
    async fn delete_prefix(&self, prefix: &str) -> AnamnesisResult<PrefixDeletion>;

    /// Check whether an object exists.
    async fn exists(&self, object_name: &str) -> AnamnesisResult<bool>;
}
