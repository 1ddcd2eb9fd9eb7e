//! Write and upsert operations.
//!
//! Every call opens its own connection and commits before returning, so a
//! failed call leaves nothing behind. Keyed upserts probe first and then
//! insert or update; the two steps are not atomic.

use super::Table;
use crate::error::{SqlWrapError, SqlWrapResult};
use crate::key::Key;
use crate::qb::{DeleteQb, InsertQb, MutationQb, SqlQb, WriteQb};
use crate::row::Row;

impl Table {
    /// Return the row with primary key `key`, inserting a key-only row first
    /// when it does not exist.
    ///
    /// Two callers racing on the same new key may both try the insert; the
    /// loser gets [`SqlWrapError::UniqueViolation`].
    pub async fn get_or_create(&self, key: impl Into<Key>) -> SqlWrapResult<Row> {
        let key = key.into();
        let pairs = self.key_pairs(&key)?;

        if let Some(row) = self.get_with(key.clone()).await? {
            return Ok(row);
        }

        let mut insert = InsertQb::into_table(&self.name);
        for (column, value) in pairs {
            insert.set_value(&column, value);
        }
        self.execute(&insert).await?;

        self.get_with(key)
            .await?
            .ok_or(SqlWrapError::Query(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Write without a key.
    ///
    /// Set and insert builders insert a new row; an update builder updates
    /// the rows its own predicates select (every row when it has none).
    /// Returns the affected row count.
    pub async fn set(&self, builder: impl Into<WriteQb>) -> SqlWrapResult<u64> {
        let mut builder = builder.into();
        if builder.values().is_empty() {
            return Err(SqlWrapError::validation(format!(
                "set on {}: no values to write",
                self.name
            )));
        }
        builder.fill_table(&self.name);

        match builder {
            WriteQb::Set(qb) => self.execute(&qb.into_insert()).await,
            WriteQb::Insert(qb) => self.execute(&qb).await,
            WriteQb::Update(qb) => self.execute(&qb).await,
        }
    }

    /// Insert-or-update the row with primary key `key`.
    ///
    /// When the row exists, key columns not already constrained are added as
    /// predicates and the values are applied as an update (nothing happens
    /// if there are no values). Otherwise key columns not already given a
    /// value are added to the values and a row is inserted. Returns the
    /// affected row count.
    pub async fn set_by_key(
        &self,
        key: impl Into<Key>,
        builder: impl Into<WriteQb>,
    ) -> SqlWrapResult<u64> {
        let key = key.into();
        let pairs = self.key_pairs(&key)?;
        let mut qb = builder.into().into_set();
        qb.fill_table(&self.name);

        if self.get_with(key).await?.is_some() {
            for (column, value) in pairs {
                qb.add_where(&column, value);
            }
            if qb.values().is_empty() {
                return Ok(0);
            }
            self.execute(&qb.into_update()).await
        } else {
            for (column, value) in pairs {
                if !qb.has_value(&column) {
                    qb.set_value(&column, value);
                }
            }
            self.execute(&qb.into_insert()).await
        }
    }

    /// Delete the rows `query` selects; without predicates every row goes.
    pub async fn delete(&self, query: &mut DeleteQb) -> SqlWrapResult<u64> {
        query.fill_table(&self.name);
        self.execute(&*query).await
    }

    pub(super) async fn execute<Q: MutationQb>(&self, qb: &Q) -> SqlWrapResult<u64> {
        let mut conn = self.connect().await?;
        let affected = qb.execute(&mut conn).await?;
        conn.commit().await?;
        Ok(affected)
    }
}
