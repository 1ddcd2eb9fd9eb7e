//! UPDATE query builder.

use crate::error::{SqlWrapError, SqlWrapResult};
use crate::qb::clause::{Assignments, WhereClause};
use crate::qb::param::ParamList;
use crate::qb::traits::{table_sql, BuiltQuery, MutationQb, SqlQb};
use crate::value::Value;

/// UPDATE query builder.
///
/// Renders `UPDATE <table> SET a = ?, b = ?[ WHERE ...]`. An update without
/// assignments cannot be rendered; `Table::set` treats it as a no-op instead.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateQb {
    table: Option<String>,
    values: Assignments,
    filter: WhereClause,
}

impl UpdateQb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: &str) -> Self {
        Self::new().table(table)
    }

    pub(crate) fn from_parts(table: Option<String>, values: Assignments, filter: WhereClause) -> Self {
        Self {
            table,
            values,
            filter,
        }
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

    pub fn set_value(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.values.set(column, value);
        self
    }

    pub fn add_where(&mut self, column: &str, value: impl Into<Value>) -> bool {
        self.filter.push_eq(column, value)
    }

    pub fn has_where(&self, column: &str) -> bool {
        self.filter.contains(column)
    }

    pub fn has_value(&self, column: &str) -> bool {
        self.values.contains(column)
    }

    pub fn values(&self) -> &Assignments {
        &self.values
    }

    pub fn filter(&self) -> &WhereClause {
        &self.filter
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Assignments, WhereClause) {
        (self.table, self.values, self.filter)
    }
}

impl SqlQb for UpdateQb {
    fn build(&self) -> SqlWrapResult<BuiltQuery> {
        let table = table_sql(self.table.as_deref(), "UpdateQb")?;
        if self.values.is_empty() {
            return Err(SqlWrapError::validation("UpdateQb: no values to set"));
        }

        let mut params = ParamList::new();
        let set_parts: Vec<String> = self
            .values
            .column_sql()?
            .into_iter()
            .map(|c| format!("{c} = ?"))
            .collect();
        params.extend(self.values.iter().map(|(_, v)| v.clone()));

        let mut sql = format!("UPDATE {table} SET {}", set_parts.join(", "));
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

impl MutationQb for UpdateQb {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_set_then_where_params() {
        let qb = UpdateQb::from_table("people")
            .value("name", "C")
            .eq("id", 1);
        let built = qb.build().unwrap();
        assert_eq!(built.sql, "UPDATE people SET name = ? WHERE id = ?");
        assert_eq!(built.params, vec![Value::from("C"), Value::from(1)]);
    }

    #[test]
    fn update_without_where_touches_all_rows() {
        let qb = UpdateQb::from_table("people").value("active", false);
        assert_eq!(qb.to_sql(), "UPDATE people SET active = ?");
    }

    #[test]
    fn update_without_values_is_invalid() {
        let qb = UpdateQb::from_table("people").eq("id", 1);
        assert!(matches!(qb.build(), Err(SqlWrapError::Validation(_))));
    }
}
