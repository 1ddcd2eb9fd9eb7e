//! SELECT query builder.

use crate::error::SqlWrapResult;
use crate::ident;
use crate::qb::clause::WhereClause;
use crate::qb::param::ParamList;
use crate::qb::traits::{table_sql, BuiltQuery, SqlQb};
use crate::value::Value;

/// SELECT query builder.
///
/// Renders `SELECT <cols> FROM <table>[ WHERE ...][ LIMIT n]`. Without an
/// explicit column list every column is selected; without predicates the
/// whole table is scanned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectQb {
    /// Target table (filled in by `Table` when unset)
    table: Option<String>,
    /// Explicit column list; empty means `*`
    columns: Vec<String>,
    /// WHERE conditions
    filter: WhereClause,
    /// LIMIT
    limit: Option<u64>,
}

impl SelectQb {
    /// Create a SELECT builder with no table; a `Table` operation fills it in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a SELECT builder for a table.
    pub fn from_table(table: &str) -> Self {
        Self::new().table(table)
    }

    // ==================== Consuming builder ====================

    /// Set the target table.
    pub fn table(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    /// Select only these columns.
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.set_columns(columns);
        self
    }

    /// Add WHERE: column = value (ignored if `column` is already constrained).
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filter.push_eq(column, value);
        self
    }

    /// Add a raw WHERE fragment with `?` placeholders.
    pub fn raw(mut self, sql: &str, params: Vec<Value>) -> Self {
        self.filter.raw(sql, params);
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    // ==================== In-place ====================

    pub fn set_columns(&mut self, columns: &[&str]) -> &mut Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Add WHERE: column = value. Returns `false` when the column was already constrained.
    pub fn add_where(&mut self, column: &str, value: impl Into<Value>) -> bool {
        self.filter.push_eq(column, value)
    }

    /// Add a raw WHERE fragment with `?` placeholders.
    pub fn add_raw(&mut self, sql: &str, params: Vec<Value>) -> &mut Self {
        self.filter.raw(sql, params);
        self
    }

    /// Whether `column` already has an equality predicate.
    pub fn has_where(&self, column: &str) -> bool {
        self.filter.contains(column)
    }

    pub fn set_limit(&mut self, n: u64) -> &mut Self {
        self.limit = Some(n);
        self
    }

    pub fn get_limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn filter(&self) -> &WhereClause {
        &self.filter
    }
}

impl SqlQb for SelectQb {
    fn build(&self) -> SqlWrapResult<BuiltQuery> {
        let table = table_sql(self.table.as_deref(), "SelectQb")?;
        let columns = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns
                .iter()
                .map(|c| ident::quote(c))
                .collect::<SqlWrapResult<Vec<_>>>()?
                .join(", ")
        };

        let mut params = ParamList::new();
        let mut sql = format!("SELECT {columns} FROM {table}");
        self.filter.write_sql(&mut sql, &mut params)?;

        if let Some(limit) = self.limit {
            // SQLite only accepts a signed 64-bit LIMIT.
            let limit = limit.min(i64::MAX as u64);
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        Ok(BuiltQuery::new(sql, params.into_vec()))
    }

    fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    fn set_table(&mut self, table: &str) {
        self.table = Some(table.to_string());
    }
}
