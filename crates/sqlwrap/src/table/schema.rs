//! Schema creation, migration and inspection.

use super::Table;
use crate::column::Column;
use crate::connector::{Connector, SyncConnection};
use crate::error::SqlWrapResult;
use crate::ident::{self, Ident};
use crate::value::Value;

const TABLE_INFO_SQL: &str = "SELECT name FROM pragma_table_info(?1)";

/// Kind of absorbed schema failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaIssueKind {
    /// The live schema could not be read.
    Inspect,
    /// `CREATE TABLE` failed.
    CreateTable,
    /// `ALTER TABLE ... ADD` failed for one column.
    AddColumn,
}

/// One schema failure recorded while opening a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    pub kind: SchemaIssueKind,
    /// Column involved, for [`SchemaIssueKind::AddColumn`].
    pub column: Option<String>,
    pub message: String,
}

impl std::fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.column {
            Some(column) => write!(f, "{:?} {}: {}", self.kind, column, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

/// What happened to the live schema when a table was opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaHealth {
    created: bool,
    added_columns: Vec<String>,
    issues: Vec<SchemaIssue>,
}

impl SchemaHealth {
    /// Whether the table was created by this open.
    pub fn created_table(&self) -> bool {
        self.created
    }

    /// Columns added by this open, in declaration order.
    pub fn added_columns(&self) -> &[String] {
        &self.added_columns
    }

    pub fn issues(&self) -> &[SchemaIssue] {
        &self.issues
    }

    /// True when any schema step failed; the live table may lack declared
    /// columns.
    pub fn is_degraded(&self) -> bool {
        !self.issues.is_empty()
    }

    fn record(&mut self, table: &str, kind: SchemaIssueKind, column: Option<&str>, message: String) {
        tracing::error!(
            target: "sqlwrap.schema",
            table,
            kind = ?kind,
            column,
            error = %message,
            "schema update failed"
        );
        self.issues.push(SchemaIssue {
            kind,
            column: column.map(str::to_string),
            message,
        });
    }
}

/// Create the table if it is missing, then add missing declared columns.
///
/// Never fails; every error is logged and recorded in the returned report.
pub(super) fn create(
    connector: &Connector,
    table: &str,
    bare_name: &str,
    primary_keys: &[String],
    columns: &[Column],
    auto_increment: bool,
) -> SchemaHealth {
    let mut health = SchemaHealth::default();

    let mut conn = match connector.connect_sync() {
        Ok(conn) => conn,
        Err(e) => {
            health.record(table, SchemaIssueKind::Inspect, None, e.to_string());
            return health;
        }
    };

    let mut existing = match live_columns(&mut conn, bare_name) {
        Ok(existing) => existing,
        Err(e) => {
            health.record(table, SchemaIssueKind::Inspect, None, e.to_string());
            return health;
        }
    };

    if existing.is_empty() {
        let created = create_table_sql(table, bare_name, primary_keys, auto_increment)
            .and_then(|sql| conn.execute(&sql, &[]))
            .and_then(|_| conn.commit());
        match created {
            Ok(()) => {
                tracing::info!(target: "sqlwrap.schema", table, keys = ?primary_keys, "created table");
                health.created = true;
                existing = primary_keys.to_vec();
            }
            Err(e) => {
                health.record(table, SchemaIssueKind::CreateTable, None, e.to_string());
                return health;
            }
        }
    }

    for column in columns {
        let name = bare_column_name(&column.name);
        if contains_column(&existing, &name) {
            continue;
        }
        match add_column_with(&mut conn, table, column) {
            Ok(()) => {
                tracing::info!(target: "sqlwrap.schema", table, column = %name, "added column");
                health.added_columns.push(name.clone());
                existing.push(name);
            }
            Err(e) => {
                health.record(table, SchemaIssueKind::AddColumn, Some(&name), e.to_string())
            }
        }
    }

    health
}

fn create_table_sql(
    table: &str,
    bare_name: &str,
    primary_keys: &[String],
    auto_increment: bool,
) -> SqlWrapResult<String> {
    let table_sql = ident::quote(table)?;
    let keys = primary_keys
        .iter()
        .map(|k| ident::quote(k))
        .collect::<SqlWrapResult<Vec<_>>>()?;

    if let [key] = keys.as_slice() {
        let auto = if auto_increment { " AUTOINCREMENT" } else { "" };
        return Ok(format!(
            "CREATE TABLE {table_sql} ({key} integer NOT NULL PRIMARY KEY{auto})"
        ));
    }

    if auto_increment {
        tracing::warn!(
            target: "sqlwrap.schema",
            table,
            "AUTOINCREMENT needs a single key column; ignored for composite key"
        );
    }
    let constraint = ident::quote(&format!("pk_{bare_name}"))
        .unwrap_or_else(|_| format!("\"pk_{}\"", bare_name.replace('"', "\"\"")));
    let definitions = keys
        .iter()
        .map(|k| format!("{k} integer NOT NULL"))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!(
        "CREATE TABLE {table_sql} ({definitions}, CONSTRAINT {constraint} PRIMARY KEY ({}))",
        keys.join(",")
    ))
}

fn add_column_with(conn: &mut SyncConnection, table: &str, column: &Column) -> SqlWrapResult<()> {
    let sql = format!(
        "ALTER TABLE {} ADD {}",
        ident::quote(table)?,
        column.definition_sql()?
    );
    conn.execute(&sql, &[])?;
    conn.commit()
}

fn live_columns(conn: &mut SyncConnection, bare_name: &str) -> SqlWrapResult<Vec<String>> {
    let rows = conn.query(TABLE_INFO_SQL, &[Value::from(bare_name)])?;
    Ok(rows
        .into_iter()
        .filter_map(|row| row.into_values().into_iter().next())
        .map(|name| name.to_string())
        .collect())
}

fn bare_column_name(name: &str) -> String {
    Ident::parse(name)
        .map(|ident| ident.name().to_string())
        .unwrap_or_else(|_| name.to_string())
}

fn contains_column(existing: &[String], name: &str) -> bool {
    existing.iter().any(|c| c.eq_ignore_ascii_case(name))
}

impl Table {
    /// Live column names, in table order.
    pub async fn get_column_list(&self) -> SqlWrapResult<Vec<String>> {
        let mut conn = self.connect().await?;
        let rows = conn
            .query(TABLE_INFO_SQL.to_string(), vec![Value::from(self.bare_name.as_str())])
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.into_values().into_iter().next())
            .map(|name| name.to_string())
            .collect())
    }

    /// Add `column` if the live table lacks it. Returns whether it was added.
    pub async fn add_column(&self, column: &Column) -> SqlWrapResult<bool> {
        let connector = self.connector.clone();
        let table = self.name.clone();
        let bare_name = self.bare_name.clone();
        let column = column.clone();

        tokio::task::spawn_blocking(move || -> SqlWrapResult<bool> {
            let mut conn = connector.connect_sync()?;
            let existing = live_columns(&mut conn, &bare_name)?;
            let name = bare_column_name(&column.name);
            if contains_column(&existing, &name) {
                return Ok(false);
            }
            add_column_with(&mut conn, &table, &column)?;
            tracing::info!(target: "sqlwrap.schema", table = %table, column = %name, "added column");
            Ok(true)
        })
        .await?
    }

    /// Same as [`add_column`](Table::add_column).
    pub async fn check_column(&self, column: &Column) -> SqlWrapResult<bool> {
        self.add_column(column).await
    }

    /// Declared columns (keys included) missing from the live table.
    ///
    /// An empty list means the live schema matches the declaration.
    pub async fn check_schema(&self) -> SqlWrapResult<Vec<String>> {
        let live = self.get_column_list().await?;
        Ok(self
            .primary_keys
            .iter()
            .map(|k| bare_column_name(k))
            .chain(self.columns.iter().map(|c| bare_column_name(&c.name)))
            .filter(|name| !contains_column(&live, name))
            .collect())
    }

    /// Drop the table. Used to reset state in tests and tools.
    pub async fn drop_table(&self) -> SqlWrapResult<()> {
        let mut conn = self.connect().await?;
        conn.execute(format!("DROP TABLE IF EXISTS {}", self.table_sql()?), Vec::new())
            .await?;
        conn.commit().await?;
        tracing::info!(target: "sqlwrap.schema", table = %self.name, "dropped table");
        Ok(())
    }
}
