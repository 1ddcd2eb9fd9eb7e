//! Error types for sqlwrap

use rusqlite::ffi;
use thiserror::Error;

/// Result type alias for sqlwrap operations
pub type SqlWrapResult<T> = Result<T, SqlWrapError>;

/// Error types for database operations
#[derive(Debug, Error)]
pub enum SqlWrapError {
    /// Database file could not be opened or attached
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] rusqlite::Error),

    /// Unique or primary key constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// NOT NULL constraint violation
    #[error("Not null violation: {0}")]
    NotNullViolation(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// A primary key argument did not match the table's key arity.
    ///
    /// This is a caller bug, not a data problem.
    #[error("Primary key arity mismatch: expected {expected} value(s), got {got}")]
    KeyArity { expected: usize, got: usize },

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Validation error (identifiers, builder state)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Blocking task failed to complete
    #[error("Task error: {0}")]
    Task(String),
}

impl SqlWrapError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a unique violation error
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }

    /// Check if this is any kind of constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::UniqueViolation(_)
                | Self::NotNullViolation(_)
                | Self::ForeignKeyViolation(_)
                | Self::CheckViolation(_)
        )
    }

    /// Check if this is a primary key arity error
    pub fn is_key_arity(&self) -> bool {
        matches!(self, Self::KeyArity { .. })
    }

    /// Parse a rusqlite error into a more specific SqlWrapError
    pub fn from_db_error(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(ref code, ref msg) = err {
            let message = msg.clone().unwrap_or_else(|| code.to_string());
            match code.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return Self::UniqueViolation(message);
                }
                ffi::SQLITE_CONSTRAINT_NOTNULL => return Self::NotNullViolation(message),
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return Self::ForeignKeyViolation(message),
                ffi::SQLITE_CONSTRAINT_CHECK => return Self::CheckViolation(message),
                _ => {}
            }
            if code.code == rusqlite::ErrorCode::CannotOpen {
                return Self::Connection(message);
            }
        }
        Self::Query(err)
    }
}

impl From<tokio::task::JoinError> for SqlWrapError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(extended_code: i32) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(
            ffi::Error::new(extended_code),
            Some("constraint failed".to_string()),
        )
    }

    #[test]
    fn classifies_unique_and_primary_key() {
        assert!(SqlWrapError::from_db_error(failure(ffi::SQLITE_CONSTRAINT_UNIQUE)).is_unique_violation());
        assert!(
            SqlWrapError::from_db_error(failure(ffi::SQLITE_CONSTRAINT_PRIMARYKEY)).is_unique_violation()
        );
    }

    #[test]
    fn classifies_not_null() {
        let err = SqlWrapError::from_db_error(failure(ffi::SQLITE_CONSTRAINT_NOTNULL));
        assert!(matches!(err, SqlWrapError::NotNullViolation(_)));
        assert!(err.is_constraint_violation());
    }

    #[test]
    fn leaves_other_errors_alone() {
        let err = SqlWrapError::from_db_error(rusqlite::Error::InvalidQuery);
        assert!(matches!(err, SqlWrapError::Query(_)));
    }

    #[test]
    fn key_arity_message() {
        let err = SqlWrapError::KeyArity { expected: 2, got: 1 };
        assert!(err.is_key_arity());
        assert_eq!(
            err.to_string(),
            "Primary key arity mismatch: expected 2 value(s), got 1"
        );
    }
}
