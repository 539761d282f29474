//! Top-level error wrapper types.

use crate::{
    ConfigError, DatabaseError, ModelsError, PipelineError, ServerError, StorageError,
};

/// The foundation error enum. Each workspace crate contributes one variant.
///
/// # Examples
///
/// ```
/// use anamnesis_error::{AnamnesisError, ConfigError};
///
/// let config_err = ConfigError::new("Missing field");
/// let err: AnamnesisError = config_err.into();
/// assert!(format!("{}", err).contains("Config Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AnamnesisErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Object storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Database error
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// External model-provider error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Session pipeline error
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Anamnesis error with kind discrimination.
///
/// # Examples
///
/// ```
/// use anamnesis_error::{AnamnesisResult, ConfigError};
///
/// fn might_fail() -> AnamnesisResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Anamnesis Error: {}", _0)]
pub struct AnamnesisError(Box<AnamnesisErrorKind>);

impl AnamnesisError {
    /// Create a new error from a kind.
    pub fn new(kind: AnamnesisErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AnamnesisErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to AnamnesisErrorKind
impl<T> From<T> for AnamnesisError
where
    T: Into<AnamnesisErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Anamnesis operations.
///
/// # Examples
///
/// ```
/// use anamnesis_error::{AnamnesisResult, ConfigError};
///
/// fn load_settings() -> AnamnesisResult<String> {
///     Err(ConfigError::new("Missing field: server.port"))?
/// }
/// ```
pub type AnamnesisResult<T> = std::result::Result<T, AnamnesisError>;
