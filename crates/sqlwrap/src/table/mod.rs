//! Declared tables.
//!
//! A [`Table`] is declared once with its name, primary-key columns and column
//! descriptors. Opening it brings the live schema up to date (creating the
//! table, adding missing columns) and then exposes CRUD-style operations that
//! translate into the [`qb`](crate::qb) builders.
//!
//! ```no_run
//! use sqlwrap::qb::SetQb;
//! use sqlwrap::{Column, Table};
//!
//! # async fn demo() -> sqlwrap::SqlWrapResult<()> {
//! let people = Table::builder("people", &["id"])
//!     .column(Column::new("name", "TEXT"))
//!     .column(Column::new("surname", "TEXT"))
//!     .database("test.db")
//!     .open()?;
//!
//! people
//!     .set_by_key(1, SetQb::new().value("name", "Safa").value("surname", "Kaya"))
//!     .await?;
//! let row = people.get_with(1).await?;
//! # Ok(())
//! # }
//! ```

mod export;
mod read;
mod schema;
mod write;

pub use schema::{SchemaHealth, SchemaIssue, SchemaIssueKind};

use crate::column::Column;
use crate::config::{self, StoreConfig};
use crate::connector::{AsyncConnection, Connector};
use crate::datapath;
use crate::error::{SqlWrapError, SqlWrapResult};
use crate::ident::{self, Ident};
use crate::key::Key;
use crate::value::Value;
use std::path::Path;
use std::sync::Arc;

/// A declared table bound to one database file.
///
/// Cloning is cheap; clones share the schema health report.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    bare_name: String,
    primary_keys: Arc<[String]>,
    columns: Arc<[Column]>,
    connector: Connector,
    config: Arc<StoreConfig>,
    health: Arc<SchemaHealth>,
}

impl Table {
    /// Start declaring a table keyed by `primary_keys`.
    pub fn builder(name: impl Into<String>, primary_keys: &[&str]) -> TableBuilder {
        TableBuilder {
            name: name.into(),
            primary_keys: primary_keys.iter().map(|k| k.to_string()).collect(),
            columns: Vec::new(),
            database: None,
            auto_increment: false,
            config: None,
        }
    }

    /// Table name as declared (brackets or quotes kept).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn primary_keys(&self) -> &[String] {
        &self.primary_keys
    }

    /// Declared column descriptors, excluding the primary keys.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Absolute path of the database file.
    pub fn database_path(&self) -> &Path {
        self.connector.path()
    }

    /// Outcome of the schema work done when the table was opened.
    pub fn schema_health(&self) -> &SchemaHealth {
        &self.health
    }

    async fn connect(&self) -> SqlWrapResult<AsyncConnection> {
        self.connector.connect().await
    }

    /// Pair `key` with the primary-key columns, failing on arity mismatch.
    fn key_pairs(&self, key: &Key) -> SqlWrapResult<Vec<(String, Value)>> {
        Ok(key
            .zip_columns(&self.primary_keys)?
            .map(|(column, value)| (column.to_string(), value.clone()))
            .collect())
    }

    fn table_sql(&self) -> SqlWrapResult<String> {
        ident::quote(&self.name)
    }
}

/// Declaration of a [`Table`]; [`open`](TableBuilder::open) runs the schema
/// work and returns the table.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    name: String,
    primary_keys: Vec<String>,
    columns: Vec<Column>,
    database: Option<String>,
    auto_increment: bool,
    config: Option<StoreConfig>,
}

impl TableBuilder {
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Database file name inside the data directory.
    ///
    /// The first table to name a database makes it the process default.
    pub fn database(mut self, name: impl Into<String>) -> Self {
        self.database = Some(name.into());
        self
    }

    /// Declare a single integer key as `AUTOINCREMENT`.
    pub fn auto_increment(mut self, enabled: bool) -> Self {
        self.auto_increment = enabled;
        self
    }

    /// Override the store configuration (defaults to [`StoreConfig::from_env`]).
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Resolve the database file and bring the live schema up to date.
    ///
    /// Schema failures do not fail the call; they are logged and recorded in
    /// [`Table::schema_health`]. Errors are returned only for invalid
    /// declarations or when no database file can be located.
    pub fn open(self) -> SqlWrapResult<Table> {
        if self.primary_keys.is_empty() {
            return Err(SqlWrapError::validation(format!(
                "table {}: at least one primary key column is required",
                self.name
            )));
        }
        let bare_name = Ident::parse(&self.name)?.name().to_string();
        for key in &self.primary_keys {
            ident::quote(key)?;
        }
        for column in &self.columns {
            column.definition_sql()?;
        }

        let config = self.config.unwrap_or_else(StoreConfig::from_env);
        if let Some(name) = &self.database {
            config::remember_database(name);
        }
        let database = config
            .resolve_database(self.database.as_deref())
            .ok_or_else(|| {
                SqlWrapError::Config(format!(
                    "table {}: no database given and no default database set",
                    self.name
                ))
            })?;
        let path = datapath::resolve(&config.data_dir, &database)?;
        let connector = Connector::new(path, config.connect_options());

        let health = schema::create(
            &connector,
            &self.name,
            &bare_name,
            &self.primary_keys,
            &self.columns,
            self.auto_increment,
        );

        Ok(Table {
            name: self.name,
            bare_name,
            primary_keys: self.primary_keys.into(),
            columns: self.columns.into(),
            connector,
            config: Arc::new(config),
            health: Arc::new(health),
        })
    }
}
