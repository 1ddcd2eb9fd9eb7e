//! INSERT query builder.

use crate::error::SqlWrapResult;
use crate::qb::clause::Assignments;
use crate::qb::traits::{table_sql, BuiltQuery, MutationQb, SqlQb};
use crate::value::Value;

/// INSERT query builder.
///
/// Renders `INSERT INTO <table> (a, b) VALUES (?, ?)`; with no values it
/// renders `INSERT INTO <table> DEFAULT VALUES`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InsertQb {
    table: Option<String>,
    values: Assignments,
}

impl InsertQb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_table(table: &str) -> Self {
        Self::new().table(table)
    }

    pub(crate) fn from_parts(table: Option<String>, values: Assignments) -> Self {
        Self { table, values }
    }

    pub fn table(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    /// Set a column value (overwrites an earlier value for the same column).
    pub fn value(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.values.set(column, value);
        self
    }

    pub fn set_value(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.values.set(column, value);
        self
    }

    pub fn has_value(&self, column: &str) -> bool {
        self.values.contains(column)
    }

    pub fn values(&self) -> &Assignments {
        &self.values
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Assignments) {
        (self.table, self.values)
    }
}

impl SqlQb for InsertQb {
    fn build(&self) -> SqlWrapResult<BuiltQuery> {
        let table = table_sql(self.table.as_deref(), "InsertQb")?;

        if self.values.is_empty() {
            return Ok(BuiltQuery::new(
                format!("INSERT INTO {table} DEFAULT VALUES"),
                Vec::new(),
            ));
        }

        let columns = self.values.column_sql()?;
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({placeholders})",
            columns.join(", ")
        );
        let params = self.values.iter().map(|(_, v)| v.clone()).collect();

        Ok(BuiltQuery::new(sql, params))
    }

    fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    fn set_table(&mut self, table: &str) {
        self.table = Some(table.to_string());
    }
}

impl MutationQb for InsertQb {}
