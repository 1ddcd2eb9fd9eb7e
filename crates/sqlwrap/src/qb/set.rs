//! SET builder: values plus predicates, resolved to INSERT or UPDATE late.
//!
//! `Table::set_by_key` decides which view to use once it knows whether the
//! keyed row exists. The insert view drops the predicates.

use crate::error::SqlWrapResult;
use crate::qb::clause::{Assignments, WhereClause};
use crate::qb::insert::InsertQb;
use crate::qb::traits::{BuiltQuery, MutationQb, SqlQb};
use crate::qb::update::UpdateQb;
use crate::value::Value;

/// Dual-mode write builder.
///
/// Rendered on its own it behaves as its insert view.
///
/// ```
/// use sqlwrap::qb::{SetQb, SqlQb};
///
/// let qb = SetQb::new().table("people").value("name", "A").eq("id", 1);
/// assert_eq!(qb.to_update().to_sql(), "UPDATE people SET name = ? WHERE id = ?");
/// assert_eq!(qb.to_insert().to_sql(), "INSERT INTO people (name) VALUES (?)");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetQb {
    table: Option<String>,
    values: Assignments,
    filter: WhereClause,
}

impl SetQb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder seeded with `(column, value)` pairs.
    pub fn from_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            values: values.into_iter().collect(),
            ..Self::default()
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

    /// Add a raw WHERE fragment with `?` placeholders (update view only).
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

    /// Insert view: values only.
    pub fn to_insert(&self) -> InsertQb {
        InsertQb::from_parts(self.table.clone(), self.values.clone())
    }

    /// Update view: values as SET, predicates as WHERE.
    pub fn to_update(&self) -> UpdateQb {
        UpdateQb::from_parts(self.table.clone(), self.values.clone(), self.filter.clone())
    }

    pub fn into_insert(self) -> InsertQb {
        InsertQb::from_parts(self.table, self.values)
    }

    pub fn into_update(self) -> UpdateQb {
        UpdateQb::from_parts(self.table, self.values, self.filter)
    }
}

impl SqlQb for SetQb {
    fn build(&self) -> SqlWrapResult<BuiltQuery> {
        self.to_insert().build()
    }

    fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    fn set_table(&mut self, table: &str) {
        self.table = Some(table.to_string());
    }
}

impl MutationQb for SetQb {}

impl From<InsertQb> for SetQb {
    fn from(qb: InsertQb) -> Self {
        let (table, values) = qb.into_parts();
        Self {
            table,
            values,
            filter: WhereClause::new(),
        }
    }
}

impl From<UpdateQb> for SetQb {
    fn from(qb: UpdateQb) -> Self {
        let (table, values, filter) = qb.into_parts();
        Self {
            table,
            values,
            filter,
        }
    }
}

/// Any builder accepted by `Table::set`.
///
/// Without a key, `Set` and `Insert` insert while `Update` updates using its
/// own predicates. With a key, every shape is folded into a [`SetQb`] first.
#[derive(Clone, Debug, PartialEq)]
pub enum WriteQb {
    Set(SetQb),
    Insert(InsertQb),
    Update(UpdateQb),
}

impl WriteQb {
    pub fn values(&self) -> &Assignments {
        match self {
            WriteQb::Set(qb) => qb.values(),
            WriteQb::Insert(qb) => qb.values(),
            WriteQb::Update(qb) => qb.values(),
        }
    }

    pub fn fill_table(&mut self, table: &str) {
        match self {
            WriteQb::Set(qb) => qb.fill_table(table),
            WriteQb::Insert(qb) => qb.fill_table(table),
            WriteQb::Update(qb) => qb.fill_table(table),
        }
    }

    pub fn into_set(self) -> SetQb {
        match self {
            WriteQb::Set(qb) => qb,
            WriteQb::Insert(qb) => qb.into(),
            WriteQb::Update(qb) => qb.into(),
        }
    }
}

impl Default for WriteQb {
    fn default() -> Self {
        WriteQb::Set(SetQb::new())
    }
}

impl From<SetQb> for WriteQb {
    fn from(qb: SetQb) -> Self {
        WriteQb::Set(qb)
    }
}

impl From<InsertQb> for WriteQb {
    fn from(qb: InsertQb) -> Self {
        WriteQb::Insert(qb)
    }
}

impl From<UpdateQb> for WriteQb {
    fn from(qb: UpdateQb) -> Self {
        WriteQb::Update(qb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_view_discards_predicates() {
        let qb = SetQb::new()
            .table("people")
            .value("name", "A")
            .eq("surname", "B");
        let built = qb.to_insert().build().unwrap();
        assert_eq!(built.sql, "INSERT INTO people (name) VALUES (?)");
        assert_eq!(built.params, vec![Value::from("A")]);
    }

    #[test]
    fn update_view_keeps_predicates() {
        let qb = SetQb::from_values([("name", "A"), ("surname", "B")])
            .table("people")
            .eq("id", 1);
        let built = qb.to_update().build().unwrap();
        assert_eq!(built.sql, "UPDATE people SET name = ?, surname = ? WHERE id = ?");
        assert_eq!(
            built.params,
            vec![Value::from("A"), Value::from("B"), Value::from(1)]
        );
    }

    #[test]
    fn update_builder_folds_into_set() {
        let set = WriteQb::from(UpdateQb::new().value("name", "C").eq("id", 2)).into_set();
        assert!(set.has_value("name"));
        assert!(set.has_where("id"));
    }

    #[test]
    fn fill_table_keeps_explicit_table() {
        let mut qb = WriteQb::from(InsertQb::into_table("other"));
        qb.fill_table("people");
        assert_eq!(qb.into_set().table_name(), Some("other"));
    }
}
