//! Clause builders for sqlwrap.
//!
//! Builders only accumulate state and render `(sql, params)`; they never touch
//! a database on their own. Values are always bound as `?` parameters and only
//! validated identifiers are spliced into the statement text.
//!
//! # Usage
//!
//! ```
//! use sqlwrap::qb::{self, SqlQb};
//!
//! let find = qb::select("people").eq("surname", "Safa").limit(10);
//! assert_eq!(find.to_sql(), "SELECT * FROM people WHERE surname = ? LIMIT 10");
//!
//! let add = qb::insert("people").value("id", 1).value("name", "Safa");
//! assert_eq!(add.to_sql(), "INSERT INTO people (id, name) VALUES (?, ?)");
//!
//! let rename = qb::update("people").value("name", "Levent").eq("id", 1);
//! assert_eq!(rename.to_sql(), "UPDATE people SET name = ? WHERE id = ?");
//!
//! let purge = qb::delete("people").eq("surname", "Safa");
//! assert_eq!(purge.to_sql(), "DELETE FROM people WHERE surname = ?");
//! ```
//!
//! Builders created with `new()` have no table; handing one to a
//! [`Table`](crate::Table) operation fills in that table's name.

mod clause;
mod delete;
mod insert;
mod param;
mod select;
mod set;
mod traits;
mod update;

pub use clause::{Assignments, WhereClause};
pub use delete::DeleteQb;
pub use insert::InsertQb;
pub use param::ParamList;
pub use select::SelectQb;
pub use set::{SetQb, WriteQb};
pub use traits::{BuiltQuery, MutationQb, SqlQb};
pub use update::UpdateQb;

/// Create a SELECT query builder for the given table.
pub fn select(table: &str) -> SelectQb {
    SelectQb::from_table(table)
}

/// Create an INSERT query builder for the given table.
pub fn insert(table: &str) -> InsertQb {
    InsertQb::into_table(table)
}

/// Create an UPDATE query builder for the given table.
pub fn update(table: &str) -> UpdateQb {
    UpdateQb::from_table(table)
}

/// Create a DELETE query builder for the given table.
///
/// Without conditions every row is deleted.
pub fn delete(table: &str) -> DeleteQb {
    DeleteQb::from_table(table)
}

/// Create a SET (insert-or-update) builder for the given table.
pub fn set(table: &str) -> SetQb {
    SetQb::new().table(table)
}

#[cfg(test)]
mod tests;
