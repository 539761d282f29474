//! Tests for the filesystem audio store.

use anamnesis_storage::{AudioStore, FileSystemStore};
use tempfile::TempDir;
use uuid::Uuid;

fn session_object() -> String {
    format!(
        "users/u1/clients/{}/sessions/1700000000.webm",
        Uuid::new_v4()
    )
}

#[tokio::test]
async fn put_and_fetch_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    let object = session_object();
    store.put(&object, b"fake audio bytes").await.unwrap();
    assert!(store.exists(&object).await.unwrap());

    let local = store.fetch(&object).await.unwrap();
    let contents = std::fs::read(local.path()).unwrap();
    assert_eq!(contents, b"fake audio bytes");

    // Local copy keeps the original extension for the upload filename
    assert_eq!(
        local.path().extension().and_then(|e| e.to_str()),
        Some("webm")
    );
}

#[tokio::test]
async fn fetch_guard_removes_local_copy_on_drop() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    let object = session_object();
    store.put(&object, b"audio").await.unwrap();

    let local = store.fetch(&object).await.unwrap();
    let local_path = local.path().to_path_buf();
    assert!(local_path.exists());

    drop(local);
    assert!(!local_path.exists());

    // The stored object itself is untouched
    assert!(store.exists(&object).await.unwrap());
}

#[tokio::test]
async fn fetch_missing_object_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    let result = store.fetch(&session_object()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn delete_prefix_removes_only_the_users_objects() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    let client_a = Uuid::new_v4();
    let client_b = Uuid::new_v4();
    let mine_1 = format!("users/u1/clients/{}/sessions/a.webm", client_a);
    let mine_2 = format!("users/u1/clients/{}/sessions/b.webm", client_b);
    let theirs = format!("users/u2/clients/{}/sessions/c.webm", client_a);

    for object in [&mine_1, &mine_2, &theirs] {
        store.put(object, b"audio").await.unwrap();
    }

    let outcome = store.delete_prefix("users/u1/").await.unwrap();
    assert_eq!(outcome.deleted, 2);
    assert_eq!(outcome.failed, 0);

    assert!(!store.exists(&mine_1).await.unwrap());
    assert!(!store.exists(&mine_2).await.unwrap());
    assert!(store.exists(&theirs).await.unwrap());
}

#[tokio::test]
async fn delete_prefix_on_missing_prefix_is_a_no_op() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    let outcome = store.delete_prefix("users/nobody/").await.unwrap();
    assert_eq!(outcome.deleted, 0);
    assert_eq!(outcome.failed, 0);
}

#[tokio::test]
async fn concurrent_puts_of_extension_siblings_both_land_intact() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    let client = Uuid::new_v4();
    let webm = format!("users/u1/clients/{}/sessions/1700000000.webm", client);
    let mp3 = format!("users/u1/clients/{}/sessions/1700000000.mp3", client);

    let (a, b) = tokio::join!(store.put(&webm, b"webm bytes"), store.put(&mp3, b"mp3 bytes"));
    a.unwrap();
    b.unwrap();

    let webm_local = store.fetch(&webm).await.unwrap();
    assert_eq!(std::fs::read(webm_local.path()).unwrap(), b"webm bytes");
    let mp3_local = store.fetch(&mp3).await.unwrap();
    assert_eq!(std::fs::read(mp3_local.path()).unwrap(), b"mp3 bytes");
}

#[tokio::test]
async fn object_names_cannot_escape_the_base_directory() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    assert!(store.put("../outside.webm", b"audio").await.is_err());
    assert!(store.put("/etc/passwd", b"audio").await.is_err());
    assert!(store.exists("").await.is_err());
}
