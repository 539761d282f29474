//! Pipeline error types.

/// Specific error conditions for the session pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Transcription returned empty or whitespace-only text
    #[display("Transcription returned empty text")]
    EmptyTranscript,
    /// Summarization returned empty or whitespace-only text
    #[display("Summarization returned empty text")]
    EmptySummary,
    /// Fan-out write (chat seed or client summary) failed
    #[display("Fan-out failed: {}", _0)]
    FanOut(String),
}

/// Pipeline error with location tracking.
///
/// # Examples
///
/// ```
/// use anamnesis_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::EmptyTranscript);
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new pipeline error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
