//! Error types for the roadmap progression engine.

use std::path::PathBuf;

use rusqlite::ErrorCode;
use thiserror::Error;

/// Comprehensive error type for all tracker operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Roadmap absent, or present but not owned by the caller.
    ///
    /// Absence and non-ownership deliberately produce the same error so a
    /// non-owner cannot distinguish "doesn't exist" from "not yours".
    #[error("Roadmap with ID {id} not found")]
    RoadmapNotFound { id: u64 },
    /// Step absent within the caller's roadmap. Same collapse as
    /// [`TrackerError::RoadmapNotFound`].
    #[error("Step with ID {id} not found")]
    StepNotFound { id: u64 },
    /// The target exists and is reachable, but the operation is illegal in
    /// its current state (completing a non-current step, resuming an
    /// abandoned roadmap).
    #[error("Invalid transition in {operation}: {reason}")]
    InvalidTransition { operation: String, reason: String },
    /// Invalid input validation errors, raised before any transaction opens
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Storage-level uniqueness or foreign-key failure, surfaced with the
    /// offending constraint text rather than a generic message
    #[error("Constraint violation ({constraint}): {message}")]
    ConstraintViolation { constraint: String, message: String },
    /// The store aborted the transaction (busy/locked). Callers should retry
    /// the whole operation with the same input.
    #[error("Transaction failed: {message}")]
    TransactionFailure {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source, classifying constraint and
    /// busy/locked failures into their dedicated variants.
    pub fn with_source(self, source: rusqlite::Error) -> TrackerError {
        classify_sqlite_error(self.message, source)
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TrackerError {
        TrackerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TrackerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates an invalid-transition error for the given operation.
    pub fn invalid_transition(
        operation: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidTransition {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Whether the caller may retry the whole operation with the same input.
    ///
    /// Transaction aborts are retryable; validation, not-found, and
    /// transition errors never are.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransactionFailure { .. })
    }
}

/// Map a rusqlite error into the tracker taxonomy.
///
/// Constraint-code failures become [`TrackerError::ConstraintViolation`]
/// carrying the constraint text SQLite reports (the violated column list);
/// busy/locked failures become [`TrackerError::TransactionFailure`];
/// everything else stays a generic [`TrackerError::Database`].
fn classify_sqlite_error(message: String, source: rusqlite::Error) -> TrackerError {
    match &source {
        rusqlite::Error::SqliteFailure(err, detail) => match err.code {
            ErrorCode::ConstraintViolation => TrackerError::ConstraintViolation {
                constraint: detail
                    .clone()
                    .unwrap_or_else(|| "unknown constraint".to_string()),
                message,
            },
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                TrackerError::TransactionFailure { message, source }
            }
            _ => TrackerError::Database { message, source },
        },
        _ => TrackerError::Database { message, source },
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TrackerError::database(message).with_source(e))
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_failures_are_classified() {
        let source = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT),
            Some("UNIQUE constraint failed: steps.roadmap_id, steps.step_order".to_string()),
        );
        let err = TrackerError::database("Failed to insert step").with_source(source);
        match err {
            TrackerError::ConstraintViolation { constraint, .. } => {
                assert!(constraint.contains("steps.step_order"));
            }
            other => panic!("Expected ConstraintViolation, got {other:?}"),
        }
    }

    #[test]
    fn busy_failures_are_retryable() {
        let source = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            Some("database is locked".to_string()),
        );
        let err = TrackerError::database("Failed to commit transaction").with_source(source);
        assert!(err.is_retryable());
    }

    #[test]
    fn validation_errors_are_not_retryable() {
        let err = TrackerError::invalid_input("goal").with_reason("Goal cannot be empty");
        assert!(!err.is_retryable());
    }
}
