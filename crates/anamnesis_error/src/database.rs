//! Database error types.

/// Kinds of database errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum DatabaseErrorKind {
    /// Failed to establish a connection
    #[display("Connection failed: {}", _0)]
    Connection(String),
    /// Query execution failed
    #[display("Query failed: {}", _0)]
    Query(String),
    /// Insert or update failed
    #[display("Write failed: {}", _0)]
    Write(String),
    /// Stored row could not be mapped onto a domain type
    #[display("Row conversion failed: {}", _0)]
    RowConversion(String),
    /// Migration failure
    #[display("Migration failed: {}", _0)]
    Migration(String),
    /// Record not found
    #[display("Record not found: {}", _0)]
    NotFound(String),
}

/// Database error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Database Error: {} at line {} in {}", kind, line, file)]
pub struct DatabaseError {
    /// The kind of error that occurred
    pub kind: DatabaseErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DatabaseError {
    /// Create a new database error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DatabaseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
