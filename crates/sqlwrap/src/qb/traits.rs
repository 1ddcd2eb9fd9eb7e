//! Trait definitions for query builders.

use crate::connector::AsyncConnection;
use crate::error::{SqlWrapError, SqlWrapResult};
use crate::ident;
use crate::row::{FromRow, Row};
use crate::value::Value;

/// Base trait for all query builders.
///
/// Provides methods for building SQL and executing queries.
pub trait SqlQb: Sync {
    /// Render the statement template and its positional parameters.
    fn build(&self) -> SqlWrapResult<BuiltQuery>;

    /// The target table, if one has been set.
    fn table_name(&self) -> Option<&str>;

    /// Set the target table, replacing any previous one.
    fn set_table(&mut self, table: &str);

    /// Set the target table only when none was given.
    fn fill_table(&mut self, table: &str) {
        if self.table_name().is_none() {
            self.set_table(table);
        }
    }

    /// Debug helper to get the SQL string.
    fn to_sql(&self) -> String {
        match self.build() {
            Ok(built) => built.sql,
            Err(e) => format!("-- invalid query: {e}"),
        }
    }

    /// Execute query and return all rows.
    fn fetch_all(
        &self,
        conn: &mut AsyncConnection,
    ) -> impl std::future::Future<Output = SqlWrapResult<Vec<Row>>> + Send {
        async move {
            let built = self.build()?;
            conn.query(built.sql, built.params).await
        }
    }

    /// Execute query and return the first row, if any.
    fn fetch_opt(
        &self,
        conn: &mut AsyncConnection,
    ) -> impl std::future::Future<Output = SqlWrapResult<Option<Row>>> + Send {
        async move {
            let rows = self.fetch_all(conn).await?;
            Ok(rows.into_iter().next())
        }
    }

    /// Execute query and map all rows to `T`.
    fn fetch_all_as<T: FromRow>(
        &self,
        conn: &mut AsyncConnection,
    ) -> impl std::future::Future<Output = SqlWrapResult<Vec<T>>> + Send {
        async move {
            let rows = self.fetch_all(conn).await?;
            rows.iter().map(T::from_row).collect()
        }
    }
}

/// Trait for mutation builders (INSERT/UPDATE/DELETE).
pub trait MutationQb: SqlQb {
    /// Execute and return affected row count.
    fn execute(
        &self,
        conn: &mut AsyncConnection,
    ) -> impl std::future::Future<Output = SqlWrapResult<u64>> + Send {
        async move {
            let built = self.build()?;
            conn.execute(built.sql, built.params).await
        }
    }
}

/// The result of building a query.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl BuiltQuery {
    /// Create a new built query.
    pub fn new(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }
}

/// Validate and render a builder's table, failing when none was set.
pub(crate) fn table_sql(table: Option<&str>, kind: &str) -> SqlWrapResult<String> {
    match table {
        Some(t) => ident::quote(t),
        None => Err(SqlWrapError::validation(format!(
            "{kind}: no table set"
        ))),
    }
}
