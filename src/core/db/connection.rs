/// Connection Management Module
///
/// This module owns the process-wide database connection slot and its
/// lifecycle: creating the database file, opening a connection, and
/// closing it again.

use crate::core::{DbKeepError, Result};
use once_cell::sync::OnceCell;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{error, info};

/// Global database connection state
///
/// This holds the current database connection and the path it was opened
/// from. It uses OnceCell for lazy initialization to ensure thread-safe
/// singleton behavior.
pub(crate) static DB_STATE: OnceCell<Mutex<DbState>> = OnceCell::new();

/// Internal database state structure
#[derive(Debug, Default)]
pub struct DbState {
    /// Active database connection (None if disconnected)
    pub connection: Option<Connection>,
    /// Path to the current database file (None if disconnected)
    pub current_path: Option<String>,
}

fn state() -> &'static Mutex<DbState> {
    DB_STATE.get_or_init(|| Mutex::new(DbState::default()))
}

fn lock_state() -> Result<MutexGuard<'static, DbState>> {
    state()
        .lock()
        .map_err(|_| DbKeepError::App("Failed to acquire database lock".to_string()))
}

/// Creates an empty database file at `db_path` if none exists.
///
/// Idempotent: an existing file is reported and left untouched, never
/// overwritten.
pub fn ensure_database(db_path: &str) -> Result<()> {
    if Path::new(db_path).exists() {
        info!("Database already exists: {}", db_path);
        return Ok(());
    }

    match Connection::open(db_path) {
        Ok(conn) => {
            // Opening with the create flag is enough to materialize the file.
            drop(conn);
            info!("Database created successfully: {}", db_path);
            Ok(())
        }
        Err(e) => {
            error!("Error creating database {}: {}", db_path, e);
            Err(DbKeepError::Database(e))
        }
    }
}

/// Opens a connection to the SQLite database at `db_path` and stores it in
/// the global slot.
///
/// Opening while a connection is already held replaces the prior handle;
/// the displaced connection is dropped, which closes it.
pub fn open_connection(db_path: &str) -> Result<()> {
    let conn = match Connection::open(db_path) {
        Ok(conn) => conn,
        Err(e) => {
            error!("Error connecting to database {}: {}", db_path, e);
            return Err(DbKeepError::Database(e));
        }
    };

    let mut guard = lock_state()?;
    guard.connection = Some(conn);
    guard.current_path = Some(db_path.to_string());
    info!("Successfully connected to database: {}", db_path);
    Ok(())
}

/// Closes the current connection and clears the global slot.
///
/// Closing when no connection is open is reported as a connection error.
pub fn close_connection() -> Result<()> {
    let mut guard = lock_state()?;
    if guard.connection.is_none() {
        error!("No open database connection to close");
        return Err(DbKeepError::Connection(
            "no open database connection".to_string(),
        ));
    }

    let path = guard.current_path.take();
    guard.connection = None;
    info!(
        "Database connection for {} closed successfully",
        path.as_deref().unwrap_or("<unknown>")
    );
    Ok(())
}

/// Checks if there's an active database connection
pub fn is_connected() -> bool {
    DB_STATE
        .get()
        .and_then(|s| s.lock().ok())
        .map(|g| g.connection.is_some())
        .unwrap_or(false)
}

/// Gets the path of the currently open database (if any)
pub fn current_path() -> Option<String> {
    DB_STATE.get()?.lock().ok()?.current_path.clone()
}

/// Runs `f` against the current connection under the state lock.
///
/// Fails with a connection error when no connection is open, so operations
/// detect the unset slot instead of panicking.
pub fn with_connection<T>(f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
    let guard = lock_state()?;
    match guard.connection.as_ref() {
        Some(conn) => f(conn),
        None => {
            error!("Database connection not initialized");
            Err(DbKeepError::Connection(
                "database connection not initialized".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Lifecycle tests share the global slot, so they serialize on this lock
    // and reset the state before each run.
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    fn test_guard() -> MutexGuard<'static, ()> {
        TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn reset_state() {
        if let Some(state_ref) = DB_STATE.get() {
            let mut state = state_ref.lock().unwrap_or_else(|e| e.into_inner());
            state.connection = None;
            state.current_path = None;
        }
    }

    #[test]
    fn test_ensure_database_is_idempotent() {
        let _guard = test_guard();
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("fresh.db");
        let db_path = db_path.to_str().unwrap();

        ensure_database(db_path).unwrap();
        assert!(Path::new(db_path).exists());

        // Second call is a no-op that still succeeds
        ensure_database(db_path).unwrap();
        assert!(Path::new(db_path).exists());
    }

    #[test]
    fn test_ensure_database_invalid_path() {
        let _guard = test_guard();
        let result = ensure_database("/nonexistent/path/database.db");
        assert!(result.is_err());
        match result.unwrap_err() {
            DbKeepError::Database(_) => {}
            other => panic!("Expected Database error, got {:?}", other),
        }
    }

    #[test]
    fn test_open_and_close_lifecycle() {
        let _guard = test_guard();
        reset_state();
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("lifecycle.db");
        let db_path = db_path.to_str().unwrap();

        assert!(!is_connected());
        open_connection(db_path).unwrap();
        assert!(is_connected());
        assert_eq!(current_path().as_deref(), Some(db_path));

        close_connection().unwrap();
        assert!(!is_connected());
        assert_eq!(current_path(), None);
    }

    #[test]
    fn test_close_without_open_is_an_error() {
        let _guard = test_guard();
        reset_state();

        let result = close_connection();
        assert!(result.is_err());
        match result.unwrap_err() {
            DbKeepError::Connection(_) => {}
            other => panic!("Expected Connection error, got {:?}", other),
        }
    }

    #[test]
    fn test_open_twice_replaces_handle() {
        let _guard = test_guard();
        reset_state();
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.db");
        let second = dir.path().join("second.db");

        open_connection(first.to_str().unwrap()).unwrap();
        open_connection(second.to_str().unwrap()).unwrap();
        assert_eq!(current_path().as_deref(), second.to_str());

        close_connection().unwrap();
    }

    #[test]
    fn test_with_connection_requires_open_slot() {
        let _guard = test_guard();
        reset_state();

        let result = with_connection(|_conn| Ok(()));
        assert!(result.is_err());
        match result.unwrap_err() {
            DbKeepError::Connection(_) => {}
            other => panic!("Expected Connection error, got {:?}", other),
        }
    }
}
