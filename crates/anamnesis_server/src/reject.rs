//! Error-to-response mapping.

use anamnesis_error::{AnamnesisError, AnamnesisErrorKind, RejectionCode, ServerErrorKind};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// An error leaving the HTTP boundary.
///
/// Rejections keep their typed code and message; everything else collapses
/// to `internal` with the error's display text.
#[derive(Debug)]
pub struct ApiError(AnamnesisError);

impl<E> From<E> for ApiError
where
    E: Into<AnamnesisError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// The HTTP status for a rejection code.
pub(crate) fn status_for(code: RejectionCode) -> StatusCode {
    match code {
        RejectionCode::Unauthenticated => StatusCode::UNAUTHORIZED,
        RejectionCode::InvalidArgument => StatusCode::BAD_REQUEST,
        RejectionCode::FailedPrecondition => StatusCode::PRECONDITION_FAILED,
        RejectionCode::NotFound => StatusCode::NOT_FOUND,
        RejectionCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    fn envelope(&self) -> (StatusCode, RejectionCode, String) {
        if let AnamnesisErrorKind::Server(server) = self.0.kind() {
            if let ServerErrorKind::Rejected { code, message } = &server.kind {
                return (status_for(*code), *code, message.clone());
            }
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            RejectionCode::Internal,
            self.0.to_string(),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.envelope();
        if status.is_server_error() {
            tracing::error!(code = %code, message = %message, "Request failed");
        } else {
            tracing::debug!(code = %code, message = %message, "Request rejected");
        }
        (
            status,
            Json(json!({ "code": code.to_string(), "message": message })),
        )
            .into_response()
    }
}
