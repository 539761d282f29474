//! Per-stage state for the session pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of one pipeline stage (transcription or summarization).
///
/// A stage is either waiting, in flight, or terminal. `Done` carries its
/// result and `Failed` carries its reason, so a stage cannot be marked done
/// without text or failed without an error message.
///
/// # Examples
///
/// ```
/// use anamnesis_core::Stage;
///
/// let stage = Stage::Queued;
/// assert!(!stage.is_terminal());
/// assert_eq!(stage.status_label(), "queued");
///
/// let done = Stage::done("Session transcript.".to_string(), chrono::Utc::now());
/// assert!(done.is_terminal());
/// assert_eq!(done.text(), Some("Session transcript."));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Stage {
    /// Waiting for the pipeline to pick the stage up
    Queued,
    /// An external call is in flight
    Processing,
    /// The stage completed with a result
    Done {
        /// The produced text (transcript or summary)
        text: String,
        /// When the stage completed
        completed_at: DateTime<Utc>,
    },
    /// The stage failed and will not be retried automatically
    #[serde(rename = "error")]
    Failed {
        /// The captured failure message
        error: String,
    },
}

impl Stage {
    /// Build a `Done` stage.
    pub fn done(text: String, completed_at: DateTime<Utc>) -> Self {
        Self::Done { text, completed_at }
    }

    /// Build a `Failed` stage.
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    /// Whether the stage has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Failed { .. })
    }

    /// The stage's result text, if done.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Done { text, .. } => Some(text),
            _ => None,
        }
    }

    /// The stage's failure message, if failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Completion timestamp, if done.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Done { completed_at, .. } => Some(*completed_at),
            _ => None,
        }
    }

    /// The short status label stored in the database and shown by the UI.
    ///
    /// Matches the original status vocabulary: `queued`, `processing`,
    /// `done`, `error`.
    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Processing => "processing",
            Self::Done { .. } => "done",
            Self::Failed { .. } => "error",
        }
    }
}
