//! End-to-end pipeline behavior against in-memory repositories, scripted
//! drivers, and a real filesystem store.

mod common;

use anamnesis_core::{
    ClientRecord, MessageKind, ObjectFinalized, Role, SessionRecord, Stage,
};
use anamnesis_interface::{ClientRepository, MessageRepository, SessionRepository};
use anamnesis_pipeline::{MemoryStore, PipelineOutcome, SessionPipeline};
use anamnesis_storage::{AudioStore, FileSystemStore};
use common::{ScriptedDriver, ScriptedTranscriber};
use std::sync::Arc;
use tempfile::TempDir;

struct Scenario {
    store: Arc<MemoryStore>,
    audio: Arc<FileSystemStore>,
    client: ClientRecord,
    session: SessionRecord,
    object_name: String,
    _dir: TempDir,
}

/// One user with one client and one queued session whose audio object is
/// already in the store.
async fn scenario() -> Scenario {
    let dir = TempDir::new().unwrap();
    let audio = Arc::new(FileSystemStore::new(dir.path()).unwrap());
    let store = Arc::new(MemoryStore::new());

    let client = ClientRecord::new("u1", "A. Client");
    let object_name = format!(
        "users/u1/clients/{}/sessions/1700000000.webm",
        client.id
    );
    let session = SessionRecord::queued("u1", client.id, &object_name);

    ClientRepository::create(store.as_ref(), &client).await.unwrap();
    SessionRepository::create(store.as_ref(), &session).await.unwrap();
    audio.put(&object_name, b"opus frames").await.unwrap();

    Scenario {
        store,
        audio,
        client,
        session,
        object_name,
        _dir: dir,
    }
}

fn pipeline(
    s: &Scenario,
    transcriber: ScriptedTranscriber,
    driver: ScriptedDriver,
) -> (SessionPipeline, Arc<ScriptedTranscriber>, Arc<ScriptedDriver>) {
    let transcriber = Arc::new(transcriber);
    let driver = Arc::new(driver);
    let pipeline = SessionPipeline::new(
        transcriber.clone(),
        driver.clone(),
        s.audio.clone(),
        s.store.clone(),
        s.store.clone(),
        s.store.clone(),
    );
    (pipeline, transcriber, driver)
}

fn event(name: &str) -> ObjectFinalized {
    ObjectFinalized {
        bucket: "recordings".to_string(),
        name: name.to_string(),
    }
}

#[tokio::test]
async fn unmatched_path_mutates_nothing() {
    let s = scenario().await;
    let (pipeline, transcriber, _) = pipeline(
        &s,
        ScriptedTranscriber::ok("hello"),
        ScriptedDriver::ok("summary"),
    );

    let outcome = pipeline
        .handle_upload(&event("avatars/u1/profile.png"))
        .await
        .unwrap();

    assert_eq!(outcome, PipelineOutcome::UnmatchedPath);
    assert_eq!(transcriber.calls(), 0);

    let session = SessionRepository::get(s.store.as_ref(), s.session.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.transcript, Stage::Queued);
    assert_eq!(session.summary, Stage::Queued);
}

#[tokio::test]
async fn matching_path_without_session_is_a_silent_skip() {
    let s = scenario().await;
    let (pipeline, transcriber, _) = pipeline(
        &s,
        ScriptedTranscriber::ok("hello"),
        ScriptedDriver::ok("summary"),
    );

    let other = format!("users/u1/clients/{}/sessions/unknown.webm", s.client.id);
    let outcome = pipeline.handle_upload(&event(&other)).await.unwrap();

    assert_eq!(outcome, PipelineOutcome::NoSession);
    assert_eq!(transcriber.calls(), 0);

    let session = SessionRepository::get(s.store.as_ref(), s.session.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.transcript, Stage::Queued);
}

#[tokio::test]
async fn completed_run_records_stages_and_fans_out() {
    let s = scenario().await;
    let (pipeline, _, _) = pipeline(
        &s,
        ScriptedTranscriber::ok("We talked about sleep."),
        ScriptedDriver::ok("The client described ongoing sleep trouble."),
    );

    let outcome = pipeline.handle_upload(&event(&s.object_name)).await.unwrap();
    assert_eq!(outcome, PipelineOutcome::Completed);

    let session = SessionRepository::get(s.store.as_ref(), s.session.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.transcript.text(), Some("We talked about sleep."));
    assert!(session.summary.text().unwrap().contains("sleep trouble"));

    let messages = s.store.list_for_session(s.session.id).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::Assistant);
    assert_eq!(messages[0].kind, MessageKind::Summary);

    let client = ClientRepository::get(s.store.as_ref(), s.client.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        client.latest_summary.as_deref(),
        Some("The client described ongoing sleep trouble.")
    );
}

#[tokio::test]
async fn summary_failure_preserves_done_transcript() {
    let s = scenario().await;
    let (pipeline, _, _) = pipeline(
        &s,
        ScriptedTranscriber::ok("A full transcript."),
        ScriptedDriver::err("rate limited"),
    );

    let outcome = pipeline.handle_upload(&event(&s.object_name)).await.unwrap();
    assert!(matches!(outcome, PipelineOutcome::Failed { .. }));

    let session = SessionRepository::get(s.store.as_ref(), s.session.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.transcript.text(), Some("A full transcript."));
    assert!(!session.summary.error().unwrap().is_empty());
}

#[tokio::test]
async fn empty_transcript_fails_both_stages_without_summarizing() {
    let s = scenario().await;
    let (pipeline, _, driver) = pipeline(
        &s,
        ScriptedTranscriber::ok("   \n "),
        ScriptedDriver::ok("never used"),
    );

    let outcome = pipeline.handle_upload(&event(&s.object_name)).await.unwrap();
    assert!(matches!(outcome, PipelineOutcome::Failed { .. }));
    assert_eq!(driver.calls(), 0);

    let session = SessionRepository::get(s.store.as_ref(), s.session.id)
        .await
        .unwrap()
        .unwrap();
    assert!(session.transcript.error().unwrap().contains("empty"));
    assert!(session.summary.error().is_some());
}

#[tokio::test]
async fn duplicate_runs_seed_exactly_one_summary_message() {
    let s = scenario().await;
    let (pipeline, _, _) = pipeline(
        &s,
        ScriptedTranscriber::ok("A transcript."),
        ScriptedDriver::ok("A summary."),
    );

    let trigger = event(&s.object_name);
    pipeline.handle_upload(&trigger).await.unwrap();
    pipeline.handle_upload(&trigger).await.unwrap();

    let messages = s.store.list_for_session(s.session.id).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].kind, MessageKind::Summary);
}
