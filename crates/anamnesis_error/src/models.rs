//! Error types for external AI model providers.

/// Kinds of model-provider errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ModelsErrorKind {
    /// Request could not be sent
    #[display("Request failed: {}", _0)]
    Http(String),
    /// Provider returned a non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code returned by the provider
        status: u16,
        /// Response body, preserved verbatim for inspection
        message: String,
    },
    /// Response body could not be parsed
    #[display("Failed to parse response: {}", _0)]
    Parse(String),
    /// Request could not be converted to the provider's wire format
    #[display("Request conversion failed: {}", _0)]
    RequestConversion(String),
    /// Audio file could not be read for upload
    #[display("Failed to read audio for upload: {}", _0)]
    AudioRead(String),
}

/// Model-provider error with location tracking.
///
/// # Examples
///
/// ```
/// use anamnesis_error::{ModelsError, ModelsErrorKind};
///
/// let err = ModelsError::new(ModelsErrorKind::Api {
///     status: 429,
///     message: "rate limited".to_string(),
/// });
/// assert!(format!("{}", err).contains("429"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at line {} in {}", kind, line, file)]
pub struct ModelsError {
    /// The kind of error that occurred
    pub kind: ModelsErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new models error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
