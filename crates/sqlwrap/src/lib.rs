//! # sqlwrap
//!
//! Declare SQLite tables once, then read and write rows without hand-written
//! SQL for the common cases.
//!
//! ## Features
//!
//! - **Declared schema**: tables are created on open and missing columns are
//!   added; existing columns are never dropped or altered
//! - **Primary-key operations**: `get_with`, `get_or_create` and `set_by_key`
//!   accept a scalar or a tuple key, checked against the declared key arity
//! - **Query builders**: `select`, `insert`, `update`, `delete` and `set`
//!   render `?`-bound SQL; identifiers are validated before use
//! - **Schema health**: schema failures never abort an open; they are logged
//!   and reported through [`SchemaHealth`]
//! - **Per-call transactions**: every write commits before it returns
//!
//! ## Example
//!
//! ```no_run
//! use sqlwrap::qb::{self, SetQb};
//! use sqlwrap::{Column, Table, Value};
//!
//! # async fn demo() -> sqlwrap::SqlWrapResult<()> {
//! let people = Table::builder("people", &["id"])
//!     .column(Column::new("name", "TEXT"))
//!     .column(Column::new("surname", "TEXT"))
//!     .database("test.db")
//!     .open()?;
//!
//! people
//!     .set(SetQb::from_values([
//!         ("id", Value::from(1)),
//!         ("name", Value::from("Safa")),
//!         ("surname", Value::from("Levent")),
//!     ]))
//!     .await?;
//! people
//!     .set_by_key(1, SetQb::new().value("surname", "Safa"))
//!     .await?;
//!
//! let rows = people.get(&mut qb::SelectQb::new().eq("surname", "Safa")).await?;
//! people.delete(&mut qb::DeleteQb::new().eq("surname", "Safa")).await?;
//! # Ok(())
//! # }
//! ```

pub mod column;
pub mod config;
pub mod connector;
pub mod datapath;
pub mod error;
pub mod ident;
pub mod key;
pub mod qb;
pub mod row;
pub mod table;
pub mod value;

pub use column::Column;
pub use config::{StoreConfig, default_database, set_default_database};
pub use connector::{AsyncConnection, ConnectOptions, Connector, SyncConnection};
pub use error::{SqlWrapError, SqlWrapResult};
pub use ident::Ident;
pub use key::Key;
pub use row::{FromRow, FromValue, Row, RowIndex};
pub use table::{SchemaHealth, SchemaIssue, SchemaIssueKind, Table, TableBuilder};
pub use value::Value;

// Re-export qb module for easy access
pub use qb::{
    BuiltQuery, DeleteQb, InsertQb, MutationQb, SelectQb, SetQb, SqlQb, UpdateQb, WriteQb, delete,
    insert, select, set, update,
};
