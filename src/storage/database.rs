//! Database gateway
//!
//! Owns the single connection to the student database. The connection is
//! opened lazily and reopened on demand, and every statement goes through
//! [`Database::execute`] with positional bind parameters.

use std::path::PathBuf;
use std::time::Duration;

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

use super::schema;
use crate::error::{GradebookError, GradebookResult};

/// Where the database lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// A database file, created if missing
    File(PathBuf),
    /// A private in-memory database (lost when the connection closes)
    InMemory,
}

/// Explicit connection configuration for the gateway
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub location: DatabaseLocation,
    pub busy_timeout: Duration,
}

impl DatabaseConfig {
    /// Configuration for a database file
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: DatabaseLocation::File(path.into()),
            busy_timeout: Duration::from_secs(5),
        }
    }

    /// Configuration for an in-memory database
    pub fn in_memory() -> Self {
        Self {
            location: DatabaseLocation::InMemory,
            busy_timeout: Duration::from_secs(5),
        }
    }

    /// Set how long a statement waits on a locked database
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }
}

/// How a statement should be run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOptions {
    /// Make the statement's effects durable before returning
    pub commit: bool,
    /// Return the result rows
    pub fetch: bool,
}

impl ExecOptions {
    /// Commit, return nothing
    pub const fn commit() -> Self {
        Self {
            commit: true,
            fetch: false,
        }
    }

    /// Return rows, do not commit
    pub const fn fetch() -> Self {
        Self {
            commit: false,
            fetch: true,
        }
    }
}

/// One result row: column name to value, in query column order
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Build a row from ordered column/value pairs
    pub fn new(columns: Vec<(String, Value)>) -> Self {
        Self { columns }
    }

    /// Value of a column by name
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Value of a column that the query is known to select
    pub fn require(&self, column: &str) -> GradebookResult<&Value> {
        self.get(column)
            .ok_or_else(|| GradebookError::Query(format!("Missing column in result: {}", column)))
    }

    /// Column names in order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }
}

/// The gateway to the relational store
pub struct Database {
    config: DatabaseConfig,
    conn: Option<Connection>,
}

impl Database {
    /// Create a gateway; no connection is opened yet
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config, conn: None }
    }

    /// Open the connection
    ///
    /// Failure is reported on stderr and returned as `false`.
    pub fn connect(&mut self) -> bool {
        match self.open() {
            Ok(conn) => {
                self.conn = Some(conn);
                true
            }
            Err(e) => {
                eprintln!("{}", e);
                false
            }
        }
    }

    /// Whether a connection is currently held
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    fn open(&self) -> GradebookResult<Connection> {
        let conn = match &self.config.location {
            DatabaseLocation::File(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent).map_err(|e| {
                            GradebookError::Connection(format!(
                                "Failed to create database directory {}: {}",
                                parent.display(),
                                e
                            ))
                        })?;
                    }
                }
                Connection::open(path)
            }
            DatabaseLocation::InMemory => Connection::open_in_memory(),
        }
        .map_err(|e| GradebookError::Connection(e.to_string()))?;

        conn.busy_timeout(self.config.busy_timeout)
            .map_err(|e| GradebookError::Connection(e.to_string()))?;

        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])
                .map_err(|e| GradebookError::Connection(format!("Failed to prepare schema: {}", e)))?;
        }

        Ok(conn)
    }

    /// Run one parameterized statement
    ///
    /// Reconnects once if no connection is held. The statement runs in its
    /// own transaction, which is committed only when `options.commit` is set.
    /// Rows are returned only when `options.fetch` is set.
    pub fn execute(
        &mut self,
        query: &str,
        params: &[Value],
        options: ExecOptions,
    ) -> GradebookResult<Option<Vec<Row>>> {
        self.in_transaction(options.commit, |conn| {
            run_statement(conn, query, params, options.fetch)
        })
    }

    /// Run one parameterized write statement and commit it
    ///
    /// Returns the number of rows the statement changed.
    pub fn execute_changes(&mut self, query: &str, params: &[Value]) -> GradebookResult<usize> {
        self.in_transaction(true, |conn| {
            conn.prepare(query)?
                .execute(params_from_iter(params.iter()))
        })
    }

    fn in_transaction<T>(
        &mut self,
        commit: bool,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> GradebookResult<T> {
        if self.conn.is_none() && !self.connect() {
            return Err(GradebookError::Connection("DB connection failed".into()));
        }
        let conn = self
            .conn
            .as_mut()
            .ok_or_else(|| GradebookError::Connection("DB connection failed".into()))?;

        let tx = conn.transaction()?;
        let value = f(&*tx)?;
        if commit {
            tx.commit()?;
        } else {
            tx.rollback()?;
        }

        Ok(value)
    }

    /// Release the connection if one is open; safe to call repeatedly
    pub fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_, e)) = conn.close() {
                eprintln!("Failed to close database cleanly: {}", e);
            }
        }
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        self.close();
    }
}

fn run_statement(
    conn: &Connection,
    query: &str,
    params: &[Value],
    fetch: bool,
) -> rusqlite::Result<Option<Vec<Row>>> {
    let mut stmt = conn.prepare(query)?;

    if !fetch {
        stmt.execute(params_from_iter(params.iter()))?;
        return Ok(None);
    }

    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let mut rows = stmt.query(params_from_iter(params.iter()))?;
    let mut out = Vec::new();

    while let Some(row) = rows.next()? {
        let mut columns = Vec::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            columns.push((name.clone(), row.get::<_, Value>(i)?));
        }
        out.push(Row::new(columns));
    }

    Ok(Some(out))
}
