//! Column/value state shared by the builders.
//!
//! - [`Assignments`]: ordered `column = value` pairs for INSERT/UPDATE. Setting a
//!   column twice overwrites the value in place.
//! - [`WhereClause`]: ordered equality predicates plus raw fragments, joined
//!   with `AND`. Adding a predicate for a column that is already constrained is
//!   a no-op.

use crate::error::SqlWrapResult;
use crate::ident;
use crate::qb::param::ParamList;
use crate::value::Value;

/// Ordered column → value assignments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignments {
    entries: Vec<(String, Value)>,
}

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value or overwrite the existing one, keeping its position.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }

    /// Render validated column names, in order.
    pub(crate) fn column_sql(&self) -> SqlWrapResult<Vec<String>> {
        self.entries.iter().map(|(c, _)| ident::quote(c)).collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Assignments
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Assignments::new();
        for (k, v) in iter {
            out.set(k, v);
        }
        out
    }
}

/// A raw SQL predicate with `?` placeholders.
#[derive(Clone, Debug, PartialEq)]
struct RawPredicate {
    sql: String,
    params: Vec<Value>,
}

/// WHERE state: equality predicates first, then raw fragments, all AND-ed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WhereClause {
    equals: Vec<(String, Value)>,
    raw: Vec<RawPredicate>,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `column = value` unless the column is already constrained.
    ///
    /// Returns `true` when the predicate was added.
    pub fn push_eq(&mut self, column: impl Into<String>, value: impl Into<Value>) -> bool {
        let column = column.into();
        if self.contains(&column) {
            return false;
        }
        self.equals.push((column, value.into()));
        true
    }

    /// Whether an equality predicate exists for `column`.
    pub fn contains(&self, column: &str) -> bool {
        self.equals.iter().any(|(c, _)| c == column)
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.equals
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    /// Add a raw fragment. It is emitted in parentheses and is not validated.
    pub fn raw(&mut self, sql: impl Into<String>, params: Vec<Value>) {
        self.raw.push(RawPredicate {
            sql: sql.into(),
            params,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.equals.is_empty() && self.raw.is_empty()
    }

    pub fn len(&self) -> usize {
        self.equals.len() + self.raw.len()
    }

    pub fn equalities(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.equals.iter().map(|(c, v)| (c.as_str(), v))
    }

    /// Append ` WHERE ...` to `sql` when there is anything to filter on.
    pub(crate) fn write_sql(&self, sql: &mut String, params: &mut ParamList) -> SqlWrapResult<()> {
        if self.is_empty() {
            return Ok(());
        }

        let mut parts = Vec::with_capacity(self.len());
        for (column, value) in &self.equals {
            parts.push(format!("{} = ?", ident::quote(column)?));
            params.push(value.clone());
        }
        for raw in &self.raw {
            parts.push(format!("({})", raw.sql));
            params.extend(raw.params.iter().cloned());
        }

        sql.push_str(" WHERE ");
        sql.push_str(&parts.join(" AND "));
        Ok(())
    }
}
