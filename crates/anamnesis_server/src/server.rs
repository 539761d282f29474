//! Router, handlers, and server lifecycle.

use crate::reject::ApiError;
use anamnesis_core::ObjectFinalized;
use anamnesis_error::{AnamnesisResult, RejectionCode, ServerError, ServerErrorKind};
use anamnesis_interface::TokenVerifier;
use anamnesis_pipeline::{AnswerService, ChatAnswerRequest, ErasureService, SessionPipeline};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use uuid::Uuid;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<SessionPipeline>,
    answers: Arc<AnswerService>,
    erasure: Arc<ErasureService>,
    verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    /// Assemble the handler state.
    pub fn new(
        pipeline: Arc<SessionPipeline>,
        answers: Arc<AnswerService>,
        erasure: Arc<ErasureService>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            pipeline,
            answers,
            erasure,
            verifier,
        }
    }
}

/// Build the service router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/events/object-finalized", post(object_finalized))
        .route("/v1/sessions/answer", post(answer))
        .route("/v1/account/erase", post(erase))
        .with_state(state)
}

/// Bind and serve until the listener fails.
pub async fn serve(addr: SocketAddr, state: AppState) -> AnamnesisResult<()> {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Serve(format!("Bind {} failed: {}", addr, e)))
    })?;

    tracing::info!(addr = %addr, "Serving");
    axum::serve(listener, router)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())).into())
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// The finalized-object hook. Always 200 with the outcome label so the
/// object-store notifier never retries filtered paths.
async fn object_finalized(
    State(state): State<AppState>,
    Json(event): Json<ObjectFinalized>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let outcome = state.pipeline.handle_upload(&event).await?;
    Ok(Json(json!({ "outcome": outcome.label() })))
}

/// Body of the answer endpoint. Fields default to empty so that a missing
/// field is rejected with `invalid-argument` rather than a parser error.
#[derive(Debug, Deserialize)]
struct AnswerBody {
    #[serde(default)]
    client_id: String,
    #[serde(default)]
    session_id: String,
    #[serde(default)]
    text: String,
}

async fn answer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<AnswerBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let uid = authenticate(&state, &headers).await?;
    let request = ChatAnswerRequest {
        client_id: parse_id(&body.client_id, "client_id")?,
        session_id: parse_id(&body.session_id, "session_id")?,
        text: body.text,
    };

    state.answers.answer(&uid, &request).await?;
    Ok(Json(json!({ "ok": true })))
}

async fn erase(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let uid = authenticate(&state, &headers).await?;
    state.erasure.erase(&uid).await?;
    Ok(Json(json!({ "ok": true })))
}

/// Resolve the caller from the `Authorization: Bearer` header.
async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<String, ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    let Some(token) = token else {
        return Err(ServerError::rejected(
            RejectionCode::Unauthenticated,
            "Missing bearer token",
        )
        .into());
    };

    match state.verifier.verify(token).await? {
        Some(uid) => Ok(uid),
        None => Err(ServerError::rejected(
            RejectionCode::Unauthenticated,
            "Token did not verify",
        )
        .into()),
    }
}

fn parse_id(value: &str, field: &str) -> Result<Uuid, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServerError::rejected(
            RejectionCode::InvalidArgument,
            format!("{} is required", field),
        )
        .into());
    }
    Uuid::parse_str(value).map_err(|_| {
        ServerError::rejected(
            RejectionCode::InvalidArgument,
            format!("{} is not a valid id", field),
        )
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticTokenVerifier;
    use anamnesis_core::{
        ClientRecord, GenerateRequest, GenerateResponse, SessionRecord, Stage, TranscriptRequest,
    };
    use anamnesis_interface::{ClientRepository, NoteDriver, SessionRepository, Transcriber};
    use anamnesis_pipeline::{MemoryIdentityStore, MemoryStore};
    use anamnesis_storage::FileSystemStore;
    use async_trait::async_trait;
    use axum::body::to_bytes;
    use chrono::Utc;
    use std::collections::HashMap;
    use tempfile::TempDir;

    struct FixedTranscriber;

    #[async_trait]
    impl Transcriber for FixedTranscriber {
        async fn transcribe(&self, _req: &TranscriptRequest) -> AnamnesisResult<String> {
            Ok("A transcript.".to_string())
        }

        fn provider_name(&self) -> &'static str {
            "fixed"
        }

        fn model_name(&self) -> &str {
            "fixed-stt"
        }
    }

    struct FixedDriver;

    #[async_trait]
    impl NoteDriver for FixedDriver {
        async fn generate(&self, _req: &GenerateRequest) -> AnamnesisResult<GenerateResponse> {
            Ok(GenerateResponse {
                text: "A reply.".to_string(),
            })
        }

        fn provider_name(&self) -> &'static str {
            "fixed"
        }

        fn model_name(&self) -> &str {
            "fixed-notes"
        }
    }

    struct Fixture {
        state: AppState,
        store: Arc<MemoryStore>,
        _dir: TempDir,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let audio = Arc::new(FileSystemStore::new(dir.path()).unwrap());
        let store = Arc::new(MemoryStore::new());
        let transcriber = Arc::new(FixedTranscriber);
        let driver = Arc::new(FixedDriver);

        let pipeline = Arc::new(SessionPipeline::new(
            transcriber,
            driver.clone(),
            audio.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        ));
        let answers = Arc::new(AnswerService::new(store.clone(), store.clone(), driver));
        let erasure = Arc::new(ErasureService::new(
            store.clone(),
            audio,
            Arc::new(MemoryIdentityStore::new()),
        ));
        let verifier = Arc::new(StaticTokenVerifier::new(HashMap::from([(
            "tok-1".to_string(),
            "u1".to_string(),
        )])));

        Fixture {
            state: AppState::new(pipeline, answers, erasure, verifier),
            store,
            _dir: dir,
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );
        headers
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unrelated_object_reports_a_skip() {
        let f = fixture();
        let response = object_finalized(
            State(f.state),
            Json(ObjectFinalized {
                bucket: "recordings".to_string(),
                name: "avatars/u1/profile.png".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0["outcome"], "skipped-unmatched-path");
    }

    #[tokio::test]
    async fn answer_without_token_is_unauthenticated() {
        let f = fixture();
        let response = answer(
            State(f.state),
            HeaderMap::new(),
            Json(AnswerBody {
                client_id: Uuid::new_v4().to_string(),
                session_id: Uuid::new_v4().to_string(),
                text: "What happened?".to_string(),
            }),
        )
        .await
        .unwrap_err()
        .into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["code"], "unauthenticated");
    }

    #[tokio::test]
    async fn malformed_session_id_is_invalid_argument() {
        let f = fixture();
        let response = answer(
            State(f.state),
            bearer("tok-1"),
            Json(AnswerBody {
                client_id: Uuid::new_v4().to_string(),
                session_id: "not-a-uuid".to_string(),
                text: "What happened?".to_string(),
            }),
        )
        .await
        .unwrap_err()
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "invalid-argument");
    }

    #[tokio::test]
    async fn answer_round_trips_for_a_ready_session() {
        let f = fixture();
        let client = ClientRecord::new("u1", "A. Client");
        let mut session = SessionRecord::queued(
            "u1",
            client.id,
            format!("users/u1/clients/{}/sessions/a.webm", client.id),
        );
        session.transcript = Stage::done("We talked.".to_string(), Utc::now());
        ClientRepository::create(f.store.as_ref(), &client).await.unwrap();
        SessionRepository::create(f.store.as_ref(), &session).await.unwrap();

        let response = answer(
            State(f.state),
            bearer("tok-1"),
            Json(AnswerBody {
                client_id: client.id.to_string(),
                session_id: session.id.to_string(),
                text: "What happened?".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0["ok"], true);
    }

    #[tokio::test]
    async fn erase_requires_a_verifiable_token() {
        let f = fixture();
        let response = erase(State(f.state), bearer("wrong"))
            .await
            .unwrap_err()
            .into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
