//! Cross-database copy, table listing and CSV export.

use super::Table;
use crate::datapath;
use crate::error::SqlWrapResult;
use crate::ident::Ident;
use crate::qb::SelectQb;
use crate::row::Row;
use std::path::PathBuf;

const ATTACH_ALIAS: &str = "new_db";

impl Table {
    /// Append every row of this table to `target_table` in another database
    /// file of the data directory. The target table must already exist with
    /// a compatible column layout. Returns the number of copied rows.
    pub async fn copy_to_table_on_another_db(
        &self,
        database: &str,
        target_table: &str,
    ) -> SqlWrapResult<u64> {
        let target = Ident::parse(target_table)?;
        let sql = format!(
            "INSERT INTO {ATTACH_ALIAS}.{target} SELECT * FROM {}",
            self.table_sql()?
        );
        let other = datapath::resolve_async(&self.config.data_dir, database).await?;

        let mut conn = self.connect().await?;
        conn.attach(other, ATTACH_ALIAS).await?;
        let copied = conn.execute(sql, Vec::new()).await?;
        conn.commit().await?;
        Ok(copied)
    }

    /// Names of the user tables in this table's database.
    ///
    /// Internal tables (`sqlite_*`) and names starting with `_` are skipped.
    pub async fn list_tables(&self) -> SqlWrapResult<Vec<String>> {
        let mut conn = self.connect().await?;
        let rows = conn
            .query(
                "SELECT name FROM sqlite_master WHERE type = 'table'".to_string(),
                Vec::new(),
            )
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.into_values().into_iter().next())
            .map(|name| name.to_string())
            .filter(|name| !name.starts_with("sqlite_") && !name.starts_with('_'))
            .collect())
    }

    /// Export the rows `query` selects (all rows by default) to a
    /// `;`-separated file in the data directory and return its absolute path.
    ///
    /// `.csv` is appended to `file_name` when missing. Values are written
    /// as-is: a value containing `;` or a newline breaks the layout.
    pub async fn write_to_file(
        &self,
        file_name: &str,
        query: Option<&mut SelectQb>,
    ) -> SqlWrapResult<PathBuf> {
        let file_name = if file_name.ends_with(".csv") {
            file_name.to_string()
        } else {
            format!("{file_name}.csv")
        };

        let rows = match query {
            Some(query) => self.get(query).await?,
            None => self.get_all().await?,
        };

        let path = datapath::resolve_async(&self.config.data_dir, &file_name).await?;
        tokio::fs::write(&path, format_rows(&rows)).await?;
        tracing::debug!(target: "sqlwrap.sql", table = %self.name, path = %path.display(), rows = rows.len(), "exported rows");
        Ok(path)
    }
}

/// Header line (only when there are rows) joined with `"; "`, then one line
/// per row joined with `";"`.
fn format_rows(rows: &[Row]) -> String {
    let mut out = String::new();
    if let Some(first) = rows.first() {
        out.push_str(&first.columns().join("; "));
        out.push('\n');
    }
    for row in rows {
        let line = row
            .values()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(";");
        out.push_str(&line);
        out.push('\n');
    }
    out
}
