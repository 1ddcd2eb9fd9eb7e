//! Read operations.

use super::Table;
use crate::error::SqlWrapResult;
use crate::key::Key;
use crate::qb::{SelectQb, SqlQb};
use crate::row::Row;
use crate::value::Value;

impl Table {
    /// Fetch the row with primary key `key`.
    ///
    /// ```no_run
    /// # async fn demo(people: sqlwrap::Table) -> sqlwrap::SqlWrapResult<()> {
    /// let row = people.get_with(1).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_with(&self, key: impl Into<Key>) -> SqlWrapResult<Option<Row>> {
        let mut query = SelectQb::new();
        self.get_with_query(key, &mut query).await
    }

    /// Fetch one row by primary key, narrowed by `query`.
    ///
    /// Key columns already constrained in `query` keep their predicate. The
    /// builder is left with the key predicates, this table and `LIMIT 1`.
    pub async fn get_with_query(
        &self,
        key: impl Into<Key>,
        query: &mut SelectQb,
    ) -> SqlWrapResult<Option<Row>> {
        let key = key.into();
        for (column, value) in self.key_pairs(&key)? {
            query.add_where(&column, value);
        }
        self.get_one(query).await
    }

    /// Fetch every row matching `query`.
    pub async fn get(&self, query: &mut SelectQb) -> SqlWrapResult<Vec<Row>> {
        query.fill_table(&self.name);
        let mut conn = self.connect().await?;
        query.fetch_all(&mut conn).await
    }

    /// Fetch the first row matching `query`, forcing `LIMIT 1`.
    pub async fn get_one(&self, query: &mut SelectQb) -> SqlWrapResult<Option<Row>> {
        query.fill_table(&self.name);
        query.set_limit(1);
        let mut conn = self.connect().await?;
        query.fetch_opt(&mut conn).await
    }

    /// Values of one column across the whole table, in table order.
    pub async fn get_column(&self, column: &str) -> SqlWrapResult<Vec<Value>> {
        let mut query = SelectQb::new().columns(&[column]);
        let rows = self.get(&mut query).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.into_values().into_iter().next())
            .collect())
    }

    /// Every row of the table.
    pub async fn get_all(&self) -> SqlWrapResult<Vec<Row>> {
        self.get(&mut SelectQb::new()).await
    }
}
