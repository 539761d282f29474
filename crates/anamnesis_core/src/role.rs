//! Role types for chat participants.

use serde::{Deserialize, Serialize};

/// The author of a chat turn or prompt message.
///
/// # Examples
///
/// ```
/// use anamnesis_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::Assistant), "assistant");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System messages carry instructions to the model
    #[display("system")]
    System,
    /// User messages are authored by the therapist
    #[display("user")]
    User,
    /// Assistant messages are model output
    #[display("assistant")]
    Assistant,
}

impl Role {
    /// Parse a stored role string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "system" => Some(Self::System),
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }
}
