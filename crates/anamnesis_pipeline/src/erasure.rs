//! Account erasure.

use anamnesis_core::SessionPath;
use anamnesis_error::AnamnesisResult;
use anamnesis_interface::{ClientRepository, IdentityStore};
use anamnesis_storage::{AudioStore, PrefixDeletion};
use std::sync::Arc;

/// What one erasure removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErasureReport {
    /// Client records removed (sessions and messages follow by cascade)
    pub clients_deleted: u64,
    /// Stored-object deletion counts
    pub objects: PrefixDeletion,
}

/// Deletes everything a user owns, one-way.
pub struct ErasureService {
    clients: Arc<dyn ClientRepository>,
    store: Arc<dyn AudioStore>,
    identity: Arc<dyn IdentityStore>,
}

impl ErasureService {
    /// Assemble the service from its collaborators.
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        store: Arc<dyn AudioStore>,
        identity: Arc<dyn IdentityStore>,
    ) -> Self {
        Self {
            clients,
            store,
            identity,
        }
    }

    /// Erase the user's data: structured subtree, then stored objects, then
    /// the identity record.
    ///
    /// Each step runs only after the previous one succeeded, so the
    /// identity record survives a data-deletion failure and the caller can
    /// retry. Per-object failures inside the prefix delete are swallowed by
    /// the store; there is no rollback once a step has run.
    #[tracing::instrument(skip(self), fields(uid = %uid))]
    pub async fn erase(&self, uid: &str) -> AnamnesisResult<ErasureReport> {
        let clients_deleted = self.clients.delete_for_user(uid).await?;

        let objects = self
            .store
            .delete_prefix(&SessionPath::user_prefix(uid))
            .await?;

        self.identity.delete_user(uid).await?;

        tracing::info!(
            uid = %uid,
            clients = clients_deleted,
            objects_deleted = objects.deleted,
            objects_failed = objects.failed,
            "Account erased"
        );

        Ok(ErasureReport {
            clients_deleted,
            objects,
        })
    }
}
