/// Record Operations Module
///
/// This module provides the owned SQL value type, the order-preserving
/// column/value record used at insert and update time, and the
/// parameterized row mutation operations built from them. Values are
/// always bound through placeholders, never interpolated into SQL text.

use crate::core::db::connection::with_connection;
use crate::core::db::schema::validate_identifier;
use crate::core::{DbKeepError, Result};
use rusqlite::types::{ToSqlOutput, Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection, ToSql};
use tracing::{error, info};

/// Core value types for SQLite operations
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    Boolean(bool),
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
            Value::Integer(i) => ToSqlOutput::Owned(SqlValue::Integer(*i)),
            Value::Real(f) => ToSqlOutput::Owned(SqlValue::Real(*f)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
            // SQLite has no boolean affinity; stored as 0/1
            Value::Boolean(b) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*b))),
        })
    }
}

impl From<ValueRef<'_>> for Value {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(f) => Value::Real(f),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).to_string()),
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Blob(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// An order-preserving mapping from column name to value, used only at
/// insert and update time.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column/value pair, keeping insertion order
    pub fn with_value(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    /// Add a column/value pair in place
    pub fn set(&mut self, column: &str, value: impl Into<Value>) {
        self.entries.push((column.to_string(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Column names in insertion order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }
}

/// Inserts `record` into `table_name` through the global connection.
///
/// Returns the engine-assigned row identifier of the inserted row.
pub fn insert_record(table_name: &str, record: &Record) -> Result<i64> {
    let result = with_connection(|conn| insert_record_on(conn, table_name, record));
    match &result {
        Ok(id) => info!(
            "Record inserted successfully into {} with id {}",
            table_name, id
        ),
        Err(e) => error!("Error inserting into {}: {}", table_name, e),
    }
    result
}

/// Inserts `record` into `table_name` on the given connection.
pub fn insert_record_on(conn: &Connection, table_name: &str, record: &Record) -> Result<i64> {
    validate_identifier(table_name)?;
    if record.is_empty() {
        return Err(DbKeepError::Query(format!(
            "no columns to insert into {}",
            table_name
        )));
    }
    for column in record.columns() {
        validate_identifier(column)?;
    }

    let columns: Vec<&str> = record.columns().collect();
    let placeholders = vec!["?"; record.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table_name,
        columns.join(", "),
        placeholders
    );

    conn.execute(&sql, params_from_iter(record.values()))?;
    Ok(conn.last_insert_rowid())
}

/// Updates rows of `table_name` matching `condition` with the columns of
/// `record`, through the global connection.
///
/// Set-clause values bind first, condition parameters after. Returns the
/// affected-row count.
pub fn update_records(
    table_name: &str,
    record: &Record,
    condition: &str,
    params: &[Value],
) -> Result<usize> {
    let result = with_connection(|conn| update_records_on(conn, table_name, record, condition, params));
    match &result {
        Ok(affected) => info!("Updated {} record(s) in {}", affected, table_name),
        Err(e) => error!("Error updating {}: {}", table_name, e),
    }
    result
}

/// Updates rows on the given connection.
pub fn update_records_on(
    conn: &Connection,
    table_name: &str,
    record: &Record,
    condition: &str,
    params: &[Value],
) -> Result<usize> {
    validate_identifier(table_name)?;
    if record.is_empty() {
        return Err(DbKeepError::Query(format!(
            "no columns to update in {}",
            table_name
        )));
    }
    for column in record.columns() {
        validate_identifier(column)?;
    }

    let set_clause = record
        .columns()
        .map(|column| format!("{} = ?", column))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!("UPDATE {} SET {} WHERE {}", table_name, set_clause, condition);

    let bound: Vec<&Value> = record.values().chain(params.iter()).collect();
    let affected = conn.execute(&sql, params_from_iter(bound))?;
    Ok(affected)
}

/// Deletes rows of `table_name` matching `condition`, through the global
/// connection.
///
/// A condition matching zero rows returns `Ok(0)`, not an error.
pub fn delete_records(table_name: &str, condition: &str, params: &[Value]) -> Result<usize> {
    let result = with_connection(|conn| delete_records_on(conn, table_name, condition, params));
    match &result {
        Ok(affected) => info!("Deleted {} record(s) from {}", affected, table_name),
        Err(e) => error!("Error deleting from {}: {}", table_name, e),
    }
    result
}

/// Deletes rows on the given connection.
pub fn delete_records_on(
    conn: &Connection,
    table_name: &str,
    condition: &str,
    params: &[Value],
) -> Result<usize> {
    validate_identifier(table_name)?;
    let sql = format!("DELETE FROM {} WHERE {}", table_name, condition);
    let affected = conn.execute(&sql, params_from_iter(params.iter()))?;
    Ok(affected)
}
