/// Error Module
///
/// This module defines the error types used across dbkeep. It provides
/// structured error handling with proper error propagation and
/// user-friendly error messages.
use thiserror::Error;

/// Error type covering every failure surfaced by the crate:
/// - Database operations (connection lifecycle, statement execution)
/// - Query execution and result processing
/// - Schema operations (table creation, identifier validation)
/// - Configuration loading
/// - File system operations
#[derive(Error, Debug)]
pub enum DbKeepError {
    /// Database-related errors from SQLite operations
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Connection lifecycle errors (not initialized, already closed)
    #[error("Connection error: {0}")]
    Connection(String),

    /// SQL query errors (execution, result processing)
    #[error("Query error: {0}")]
    Query(String),

    /// Schema-related errors (table creation, identifier validation)
    #[error("Schema error: {0}")]
    Schema(String),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic application errors for unexpected conditions
    #[error("Application error: {0}")]
    App(String),
}

/// Type alias for Result to use DbKeepError as the error type.
///
/// This provides a consistent error type across the entire crate
/// instead of using `Result<T, String>` or mixed error types.
pub type Result<T> = std::result::Result<T, DbKeepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let db_err = DbKeepError::Database(rusqlite::Error::ExecuteReturnedResults);
        assert!(db_err.to_string().contains("Database error"));

        let conn_err = DbKeepError::Connection("database connection not initialized".to_string());
        assert!(conn_err.to_string().contains("Connection error"));

        let schema_err = DbKeepError::Schema("invalid identifier".to_string());
        assert!(schema_err.to_string().contains("Schema error"));
    }

    #[test]
    fn test_error_conversion() {
        // Test IO error conversion
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let keep_err: DbKeepError = io_err.into();
        match keep_err {
            DbKeepError::Io(_) => {}
            _ => panic!("Expected IO error"),
        }

        // Test rusqlite error conversion
        let sql_err = rusqlite::Error::ExecuteReturnedResults;
        let keep_err: DbKeepError = sql_err.into();
        match keep_err {
            DbKeepError::Database(_) => {}
            _ => panic!("Expected Database error"),
        }
    }
}
