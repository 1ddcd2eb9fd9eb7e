//! DELETE query builder.

use crate::error::SqlWrapResult;
use crate::qb::clause::WhereClause;
use crate::qb::param::ParamList;
use crate::qb::traits::{table_sql, BuiltQuery, MutationQb, SqlQb};
use crate::value::Value;

/// DELETE query builder.
///
/// Without predicates this deletes every row of the table. There is no
/// confirmation step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteQb {
    table: Option<String>,
    filter: WhereClause,
}

impl DeleteQb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: &str) -> Self {
        Self::new().table(table)
    }

    pub fn table(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
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

    pub fn add_where(&mut self, column: &str, value: impl Into<Value>) -> bool {
        self.filter.push_eq(column, value)
    }

    pub fn has_where(&self, column: &str) -> bool {
        self.filter.contains(column)
    }

    pub fn filter(&self) -> &WhereClause {
        &self.filter
    }
}

impl SqlQb for DeleteQb {
    fn build(&self) -> SqlWrapResult<BuiltQuery> {
        let table = table_sql(self.table.as_deref(), "DeleteQb")?;
        let mut params = ParamList::new();
        let mut sql = format!("DELETE FROM {table}");
        self.filter.write_sql(&mut sql, &mut params)?;
        Ok(BuiltQuery::new(sql, params.into_vec()))
    }

    fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    fn set_table(&mut self, table: &str) {
        self.table = Some(table.to_string());
    }
}

impl MutationQb for DeleteQb {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_delete() {
        let qb = DeleteQb::from_table("people").eq("id", 1);
        assert_eq!(qb.to_sql(), "DELETE FROM people WHERE id = ?");
    }

    #[test]
    fn test_delete_without_where_deletes_all() {
        let qb = DeleteQb::from_table("people");
        assert_eq!(qb.to_sql(), "DELETE FROM people");
    }

    #[test]
    fn test_delete_complex_where() {
        let qb = DeleteQb::from_table("people")
            .eq("surname", "Safa")
            .raw("id > ?", vec![Value::from(10)]);
        let built = qb.build().unwrap();
        assert_eq!(built.sql, "DELETE FROM people WHERE surname = ? AND (id > ?)");
        assert_eq!(built.params, vec![Value::from("Safa"), Value::from(10)]);
    }
}
