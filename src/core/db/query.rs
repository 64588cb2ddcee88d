/// Query Execution Module
///
/// This module provides generic parameterized statement execution and the
/// fetch operations. Every global operation has an on-connection
/// counterpart so callers holding their own `Connection` reuse the same
/// code path.

use crate::core::db::connection::with_connection;
use crate::core::db::record::Value;
use crate::core::{DbKeepError, Result};
use rusqlite::{params_from_iter, Connection};
use tracing::{error, info};

/// Represents the result of a fetch operation
#[derive(Debug)]
pub struct QueryResult {
    /// Column names from the query result
    pub columns: Vec<String>,
    /// Rows of typed values
    pub rows: Vec<Vec<Value>>,
    /// Number of rows returned
    pub row_count: usize,
}

impl QueryResult {
    /// Creates a new QueryResult from column names and row data
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let row_count = rows.len();
        QueryResult {
            columns,
            rows,
            row_count,
        }
    }
}

/// Executes a parameterized statement through the global connection.
///
/// Mutations commit immediately; statements that return rows belong in the
/// fetch operations instead.
pub fn execute(sql: &str, params: &[Value]) -> Result<()> {
    let result = with_connection(|conn| execute_on(conn, sql, params));
    match &result {
        Ok(()) => info!("Query executed successfully"),
        Err(e) => error!("Error executing query: {}", e),
    }
    result
}

/// Executes a parameterized statement on the given connection.
pub fn execute_on(conn: &Connection, sql: &str, params: &[Value]) -> Result<()> {
    conn.execute(sql, params_from_iter(params.iter()))?;
    Ok(())
}

/// Runs a parameterized read through the global connection and returns all
/// rows.
pub fn fetch_all(sql: &str, params: &[Value]) -> Result<QueryResult> {
    let result = with_connection(|conn| fetch_all_on(conn, sql, params));
    match &result {
        Ok(rows) => info!("Fetched {} result(s)", rows.row_count),
        Err(e) => error!("Error fetching data: {}", e),
    }
    result
}

/// Runs a parameterized read on the given connection and returns all rows.
pub fn fetch_all_on(conn: &Connection, sql: &str, params: &[Value]) -> Result<QueryResult> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| DbKeepError::Query(format!("Failed to prepare statement: {}", e)))?;

    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let column_count = stmt.column_count();

    let rows = stmt
        .query_map(params_from_iter(params.iter()), |row| {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                values.push(Value::from(row.get_ref(i)?));
            }
            Ok(values)
        })
        .map_err(|e| DbKeepError::Query(format!("Query execution failed: {}", e)))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| DbKeepError::Query(format!("Result processing failed: {}", e)))?;

    Ok(QueryResult::new(columns, rows))
}

/// Runs a parameterized read through the global connection and returns at
/// most one row.
///
/// A query matching zero rows returns `Ok(None)`, distinct from the error
/// case.
pub fn fetch_one(sql: &str, params: &[Value]) -> Result<Option<Vec<Value>>> {
    let result = with_connection(|conn| fetch_one_on(conn, sql, params));
    match &result {
        Ok(Some(_)) => info!("Successfully fetched one result"),
        Ok(None) => info!("No result found"),
        Err(e) => error!("Error fetching data: {}", e),
    }
    result
}

/// Runs a parameterized read on the given connection and returns at most
/// one row.
pub fn fetch_one_on(conn: &Connection, sql: &str, params: &[Value]) -> Result<Option<Vec<Value>>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| DbKeepError::Query(format!("Failed to prepare statement: {}", e)))?;

    let column_count = stmt.column_count();
    let mut rows = stmt
        .query(params_from_iter(params.iter()))
        .map_err(|e| DbKeepError::Query(format!("Query execution failed: {}", e)))?;

    match rows
        .next()
        .map_err(|e| DbKeepError::Query(format!("Result processing failed: {}", e)))?
    {
        Some(row) => {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let value_ref = row
                    .get_ref(i)
                    .map_err(|e| DbKeepError::Query(format!("Result processing failed: {}", e)))?;
                values.push(Value::from(value_ref));
            }
            Ok(Some(values))
        }
        None => Ok(None),
    }
}
