//! Server error types and caller-facing rejection codes.

/// Typed rejection codes surfaced to API callers.
///
/// Each code maps to one HTTP status in the server crate; the set matches
/// the callable-endpoint contract (unauthenticated, invalid-argument,
/// failed-precondition, not-found, internal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RejectionCode {
    /// Caller identity missing or unverifiable
    #[display("unauthenticated")]
    Unauthenticated,
    /// A required input was missing, empty, or malformed
    #[display("invalid-argument")]
    InvalidArgument,
    /// The operation's precondition does not hold (e.g. transcript not ready)
    #[display("failed-precondition")]
    FailedPrecondition,
    /// The referenced record does not exist
    #[display("not-found")]
    NotFound,
    /// Any other failure
    #[display("internal")]
    Internal,
}

/// Kinds of server errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ServerErrorKind {
    /// Request rejected before any work was done
    #[display("{}: {}", code, message)]
    Rejected {
        /// The caller-facing rejection code
        code: RejectionCode,
        /// Human-readable reason
        message: String,
    },
    /// Server failed to bind or serve
    #[display("Serve failed: {}", _0)]
    Serve(String),
}

/// Server error with location tracking.
///
/// # Examples
///
/// ```
/// use anamnesis_error::{RejectionCode, ServerError, ServerErrorKind};
///
/// let err = ServerError::new(ServerErrorKind::Rejected {
///     code: RejectionCode::InvalidArgument,
///     message: "text is required".to_string(),
/// });
/// assert!(format!("{}", err).contains("invalid-argument"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Server Error: {} at line {} in {}", kind, line, file)]
pub struct ServerError {
    /// The kind of error that occurred
    pub kind: ServerErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ServerError {
    /// Create a new server error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Convenience constructor for a caller-facing rejection.
    #[track_caller]
    pub fn rejected(code: RejectionCode, message: impl Into<String>) -> Self {
        Self::new(ServerErrorKind::Rejected {
            code,
            message: message.into(),
        })
    }
}
