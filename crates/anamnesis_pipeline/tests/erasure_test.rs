//! Account erasure sequencing.

use anamnesis_core::{ChatMessage, ClientRecord, Role, SessionRecord};
use anamnesis_error::{AnamnesisResult, DatabaseError, DatabaseErrorKind};
use anamnesis_interface::{ClientRepository, MessageRepository, SessionRepository};
use anamnesis_pipeline::{ErasureService, MemoryIdentityStore, MemoryStore};
use anamnesis_storage::{AudioStore, FileSystemStore};
use async_trait::async_trait;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

async fn populated() -> (TempDir, Arc<MemoryStore>, Arc<FileSystemStore>, String) {
    let dir = TempDir::new().unwrap();
    let audio = Arc::new(FileSystemStore::new(dir.path()).unwrap());
    let store = Arc::new(MemoryStore::new());

    let client = ClientRecord::new("u1", "A. Client");
    let object_name = format!("users/u1/clients/{}/sessions/a.webm", client.id);
    let session = SessionRecord::queued("u1", client.id, &object_name);

    ClientRepository::create(store.as_ref(), &client).await.unwrap();
    SessionRepository::create(store.as_ref(), &session).await.unwrap();
    store
        .append(&ChatMessage::chat(session.id, Role::User, "hello"))
        .await
        .unwrap();
    audio.put(&object_name, b"opus frames").await.unwrap();

    (dir, store, audio, object_name)
}

#[tokio::test]
async fn erase_removes_data_objects_and_identity() {
    let (_dir, store, audio, object_name) = populated().await;
    let identity = Arc::new(MemoryIdentityStore::new());
    identity.add_user("u1");

    let service = ErasureService::new(store.clone(), audio.clone(), identity.clone());
    let report = service.erase("u1").await.unwrap();

    assert_eq!(report.clients_deleted, 1);
    assert_eq!(report.objects.deleted, 1);
    assert_eq!(report.objects.failed, 0);
    assert!(!audio.exists(&object_name).await.unwrap());
    assert!(!identity.has_user("u1"));
}

#[tokio::test]
async fn erase_leaves_other_users_untouched() {
    let (_dir, store, audio, _) = populated().await;
    let other = ClientRecord::new("u2", "B. Client");
    let other_object = format!("users/u2/clients/{}/sessions/b.webm", other.id);
    ClientRepository::create(store.as_ref(), &other).await.unwrap();
    audio.put(&other_object, b"audio").await.unwrap();

    let identity = Arc::new(MemoryIdentityStore::new());
    identity.add_user("u1");
    identity.add_user("u2");

    let service = ErasureService::new(store.clone(), audio.clone(), identity.clone());
    service.erase("u1").await.unwrap();

    assert!(ClientRepository::get(store.as_ref(), other.id).await.unwrap().is_some());
    assert!(audio.exists(&other_object).await.unwrap());
    assert!(identity.has_user("u2"));
}

/// A client repository whose user-subtree delete always fails.
struct BrokenClients;

#[async_trait]
impl ClientRepository for BrokenClients {
    async fn create(&self, _client: &ClientRecord) -> AnamnesisResult<()> {
        Ok(())
    }

    async fn get(&self, _client_id: Uuid) -> AnamnesisResult<Option<ClientRecord>> {
        Ok(None)
    }

    async fn set_latest_summary(&self, _client_id: Uuid, _summary: &str) -> AnamnesisResult<()> {
        Ok(())
    }

    async fn delete_for_user(&self, _uid: &str) -> AnamnesisResult<u64> {
        Err(DatabaseError::new(DatabaseErrorKind::Write("connection reset".to_string())).into())
    }
}

#[tokio::test]
async fn structured_failure_blocks_identity_deletion() {
    let (_dir, _, audio, object_name) = populated().await;
    let identity = Arc::new(MemoryIdentityStore::new());
    identity.add_user("u1");

    let service = ErasureService::new(Arc::new(BrokenClients), audio.clone(), identity.clone());
    let result = service.erase("u1").await;

    assert!(result.is_err());
    assert!(identity.has_user("u1"));
    assert!(audio.exists(&object_name).await.unwrap());
}
