//! SQLite connections.
//!
//! A [`Connector`] knows how to open one database file. Every call opens its
//! own connection; nothing is pooled. DML runs inside an implicit transaction
//! that only becomes durable on [`SyncConnection::commit`]. Dropping a
//! connection without committing rolls the work back.
//!
//! [`AsyncConnection`] wraps the blocking connection and moves each call onto
//! `tokio::task::spawn_blocking`.

use crate::error::{SqlWrapError, SqlWrapResult};
use crate::ident;
use crate::row::Row;
use crate::value::Value;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Per-connection settings.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// How long SQLite waits on a locked file before failing.
    pub busy_timeout: Duration,
    /// Value of `PRAGMA foreign_keys` for every connection.
    pub foreign_keys: bool,
    /// Truncate logged SQL to this many bytes. `None` logs the full statement.
    pub max_sql_log_length: Option<usize>,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            busy_timeout: Duration::from_secs(5),
            foreign_keys: true,
            max_sql_log_length: Some(200),
        }
    }
}

/// Opens connections to one database file.
#[derive(Debug, Clone)]
pub struct Connector {
    path: Arc<PathBuf>,
    options: ConnectOptions,
}

impl Connector {
    pub fn new(path: impl Into<PathBuf>, options: ConnectOptions) -> Self {
        Self {
            path: Arc::new(path.into()),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &ConnectOptions {
        &self.options
    }

    /// Open a blocking connection.
    pub fn connect_sync(&self) -> SqlWrapResult<SyncConnection> {
        let conn = Connection::open(self.path.as_path()).map_err(|e| {
            SqlWrapError::Connection(format!("{}: {e}", self.path.display()))
        })?;
        conn.busy_timeout(self.options.busy_timeout)
            .map_err(SqlWrapError::from_db_error)?;
        let foreign_keys = if self.options.foreign_keys { "ON" } else { "OFF" };
        conn.execute_batch(&format!("PRAGMA foreign_keys = {foreign_keys}"))
            .map_err(SqlWrapError::from_db_error)?;

        Ok(SyncConnection {
            conn,
            max_sql_log_length: self.options.max_sql_log_length,
        })
    }

    /// Open a connection driven from async code.
    pub async fn connect(&self) -> SqlWrapResult<AsyncConnection> {
        let connector = self.clone();
        let conn = tokio::task::spawn_blocking(move || connector.connect_sync()).await??;
        Ok(AsyncConnection { inner: Some(conn) })
    }
}

/// A blocking connection.
#[derive(Debug)]
pub struct SyncConnection {
    conn: Connection,
    max_sql_log_length: Option<usize>,
}

impl SyncConnection {
    /// Run a statement and collect every row.
    pub fn query(&mut self, sql: &str, params: &[Value]) -> SqlWrapResult<Vec<Row>> {
        let start = Instant::now();
        let rows = run_query(&self.conn, sql, params)?;
        tracing::debug!(
            target: "sqlwrap.sql",
            sql = %self.log_sql(sql),
            param_count = params.len(),
            elapsed = ?start.elapsed(),
            rows = rows.len(),
            "query"
        );
        Ok(rows)
    }

    /// Run a statement inside the connection's transaction and return the
    /// affected row count.
    pub fn execute(&mut self, sql: &str, params: &[Value]) -> SqlWrapResult<u64> {
        let start = Instant::now();
        self.begin()?;
        let affected = self
            .conn
            .execute(sql, rusqlite::params_from_iter(params.iter()))
            .map_err(SqlWrapError::from_db_error)?;
        tracing::debug!(
            target: "sqlwrap.sql",
            sql = %self.log_sql(sql),
            param_count = params.len(),
            elapsed = ?start.elapsed(),
            affected,
            "execute"
        );
        Ok(affected as u64)
    }

    /// Run parameterless statements separated by `;`.
    pub fn execute_batch(&mut self, sql: &str) -> SqlWrapResult<()> {
        let start = Instant::now();
        self.begin()?;
        self.conn
            .execute_batch(sql)
            .map_err(SqlWrapError::from_db_error)?;
        tracing::debug!(
            target: "sqlwrap.sql",
            sql = %self.log_sql(sql),
            elapsed = ?start.elapsed(),
            "execute_batch"
        );
        Ok(())
    }

    /// Attach another database file under `alias`.
    ///
    /// SQLite refuses ATTACH inside a transaction, so this must run before
    /// any write on the connection.
    pub fn attach(&mut self, path: &Path, alias: &str) -> SqlWrapResult<()> {
        if !self.conn.is_autocommit() {
            return Err(SqlWrapError::Connection(format!(
                "cannot attach {} inside an open transaction",
                path.display()
            )));
        }
        let sql = format!("ATTACH DATABASE ?1 AS {}", ident::quote(alias)?);
        let file = path.to_string_lossy().into_owned();
        self.conn
            .execute(&sql, [file.as_str()])
            .map_err(|e| SqlWrapError::Connection(format!("{}: {e}", path.display())))?;
        tracing::debug!(target: "sqlwrap.sql", sql = %sql, file = %file, "attach");
        Ok(())
    }

    /// Make pending writes durable. A no-op when nothing was written.
    pub fn commit(&mut self) -> SqlWrapResult<()> {
        if !self.conn.is_autocommit() {
            self.conn
                .execute_batch("COMMIT")
                .map_err(SqlWrapError::from_db_error)?;
        }
        Ok(())
    }

    /// Close the connection, rolling back anything not committed.
    pub fn close(self) -> SqlWrapResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| SqlWrapError::from_db_error(e))
    }

    fn begin(&mut self) -> SqlWrapResult<()> {
        if self.conn.is_autocommit() {
            self.conn
                .execute_batch("BEGIN")
                .map_err(SqlWrapError::from_db_error)?;
        }
        Ok(())
    }

    fn log_sql(&self, sql: &str) -> String {
        match self.max_sql_log_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

fn run_query(conn: &Connection, sql: &str, params: &[Value]) -> SqlWrapResult<Vec<Row>> {
    let mut stmt = conn.prepare(sql).map_err(SqlWrapError::from_db_error)?;
    let columns: Arc<[String]> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let width = columns.len();

    let mut rows = stmt
        .query(rusqlite::params_from_iter(params.iter()))
        .map_err(SqlWrapError::from_db_error)?;

    let mut out = Vec::new();
    while let Some(row) = rows.next().map_err(SqlWrapError::from_db_error)? {
        let mut values = Vec::with_capacity(width);
        for i in 0..width {
            values.push(row.get::<_, Value>(i).map_err(SqlWrapError::from_db_error)?);
        }
        out.push(Row::new(Arc::clone(&columns), values));
    }
    Ok(out)
}

/// Truncate to at most `max_bytes` without splitting a UTF-8 character.
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// A connection whose calls are awaited.
///
/// Each call hands the underlying [`SyncConnection`] to a blocking task and
/// takes it back when the task finishes.
#[derive(Debug)]
pub struct AsyncConnection {
    inner: Option<SyncConnection>,
}

impl AsyncConnection {
    async fn run<T, F>(&mut self, f: F) -> SqlWrapResult<T>
    where
        F: FnOnce(&mut SyncConnection) -> SqlWrapResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut conn = self
            .inner
            .take()
            .ok_or_else(|| SqlWrapError::Connection("connection lost".to_string()))?;
        let (conn, result) = tokio::task::spawn_blocking(move || {
            let result = f(&mut conn);
            (conn, result)
        })
        .await?;
        self.inner = Some(conn);
        result
    }

    pub async fn query(&mut self, sql: String, params: Vec<Value>) -> SqlWrapResult<Vec<Row>> {
        self.run(move |conn| conn.query(&sql, &params)).await
    }

    pub async fn execute(&mut self, sql: String, params: Vec<Value>) -> SqlWrapResult<u64> {
        self.run(move |conn| conn.execute(&sql, &params)).await
    }

    pub async fn execute_batch(&mut self, sql: String) -> SqlWrapResult<()> {
        self.run(move |conn| conn.execute_batch(&sql)).await
    }

    pub async fn attach(&mut self, path: PathBuf, alias: &str) -> SqlWrapResult<()> {
        let alias = alias.to_string();
        self.run(move |conn| conn.attach(&path, &alias)).await
    }

    pub async fn commit(&mut self) -> SqlWrapResult<()> {
        self.run(SyncConnection::commit).await
    }

    pub async fn close(mut self) -> SqlWrapResult<()> {
        match self.inner.take() {
            Some(conn) => tokio::task::spawn_blocking(move || conn.close()).await?,
            None => Ok(()),
        }
    }
}
