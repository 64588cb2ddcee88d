/// Schema Operations Module
///
/// This module provides table creation and the small introspection surface
/// built on `sqlite_master`. Table and column names are validated against
/// an identifier allow-list before they are interpolated into SQL text;
/// column-definition strings are caller-trusted schema text and pass
/// through to the engine unchanged.

use crate::config;
use crate::core::db::connection::{self, with_connection};
use crate::core::{DbKeepError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;
use tracing::{debug, error, info, warn};

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Validates a table or column name against the identifier allow-list.
///
/// Only names are validated this way; values never reach SQL text at all,
/// they are bound as statement parameters.
pub fn validate_identifier(name: &str) -> Result<()> {
    if IDENTIFIER_RE.is_match(name) {
        Ok(())
    } else {
        Err(DbKeepError::Schema(format!(
            "invalid identifier: {:?}",
            name
        )))
    }
}

/// Creates `table_name` with the given raw column definitions, through the
/// global connection.
///
/// Issues `CREATE TABLE IF NOT EXISTS`, so an existing table is left
/// untouched. If no connection is open, one reconnect attempt is made
/// against the configured default database path before the operation runs;
/// a failed reconnect propagates as an error rather than terminating the
/// process.
pub fn create_table(table_name: &str, column_defs: &str) -> Result<()> {
    validate_identifier(table_name)?;

    if !connection::is_connected() {
        error!("Database connection not initialized");
        let fallback = config::default_database_path();
        warn!(
            "Attempting to reconnect using configured database path: {}",
            fallback
        );
        connection::open_connection(&fallback)?;
    }

    let result = with_connection(|conn| create_table_on(conn, table_name, column_defs));
    match &result {
        Ok(()) => info!("Table created successfully: {}", table_name),
        Err(e) => error!("Error creating table {}: {}", table_name, e),
    }
    result
}

/// Creates `table_name` on the given connection.
pub fn create_table_on(conn: &Connection, table_name: &str, column_defs: &str) -> Result<()> {
    validate_identifier(table_name)?;
    let sql = format!("CREATE TABLE IF NOT EXISTS {} ({})", table_name, column_defs);
    conn.execute(&sql, [])?;
    Ok(())
}

/// Checks whether `table_name` exists, through the global connection.
pub fn table_exists(table_name: &str) -> Result<bool> {
    let exists = with_connection(|conn| table_exists_on(conn, table_name))?;
    if exists {
        debug!("Table '{}' exists", table_name);
    } else {
        debug!("Table '{}' does not exist", table_name);
    }
    Ok(exists)
}

/// Checks whether `table_name` exists on the given connection.
pub fn table_exists_on(conn: &Connection, table_name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")?;
    let exists = stmt.exists([table_name])?;
    Ok(exists)
}

/// Lists user-defined tables, through the global connection.
pub fn table_names() -> Result<Vec<String>> {
    with_connection(table_names_on)
}

/// Lists user-defined tables on the given connection, excluding SQLite's
/// internal `sqlite_%` tables.
pub fn table_names_on(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name",
    )?;
    let name_iter = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut names = Vec::new();
    for name in name_iter {
        names.push(name?);
    }
    Ok(names)
}
