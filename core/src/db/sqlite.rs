// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Common utilities to interact with an SQLite database.

use crate::db::{split_schema, BareTx, Db, DbError, DbResult};
use async_trait::async_trait;
use derivative::Derivative;
use futures::lock::Mutex;
use sqlx::sqlite::{Sqlite, SqlitePool};
use sqlx::Transaction;
use std::marker::PhantomData;

/// Takes a raw SQLx error `e` and converts it to our generic error type.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::RowNotFound => DbError::NotFound,
        e if e.to_string().contains("FOREIGN KEY constraint failed") => DbError::NotFound,
        e if e.to_string().contains("UNIQUE constraint failed") => DbError::AlreadyExists,
        e => DbError::BackendError(e.to_string()),
    }
}

/// The raw transaction type that SQLite-backed transactions wrap.
///
/// The transaction lives behind a mutex so that the wrapping types are `Sync`.
pub type SqliteSqlxTx = Mutex<Transaction<'static, Sqlite>>;

/// A database instance backed by an SQLite database and handing out transactions of type `T`.
#[derive(Derivative)]
#[derivative(Clone(bound = ""))]
pub struct SqliteDb<T>
where
    T: BareTx + From<SqliteSqlxTx> + Send + Sync + 'static,
{
    /// Shared SQLite connection pool.  This is a cloneable type that all concurrent
    /// transactions can use concurrently.
    pool: SqlitePool,

    /// Marker for the unused type `T`.
    _phantom_tx: PhantomData<T>,
}

#[async_trait]
impl<T> Db for SqliteDb<T>
where
    T: BareTx + From<SqliteSqlxTx> + Send + Sync + 'static,
{
    type Tx = T;

    async fn begin(&self) -> DbResult<Self::Tx> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(T::from(Mutex::from(tx)))
    }
}

/// Helper function to initialize the database with a schema.  Use in implementations of
/// `BareTx::migrate`.
pub async fn run_schema(tx: &mut SqliteSqlxTx, schema: &str) -> DbResult<()> {
    let mut tx = tx.lock().await;
    for stmt in split_schema(schema)? {
        sqlx::query(&stmt).execute(&mut **tx).await.map_err(map_sqlx_error)?;
    }
    Ok(())
}

/// Test utilities for the SQLite connection.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    /// Initializes an in-memory test database with the schema of `T`.
    ///
    /// The pool is limited to a single connection because every connection to `:memory:` gets
    /// its own private database.
    pub async fn setup<T>() -> SqliteDb<T>
    where
        T: BareTx + From<SqliteSqlxTx> + Send + Sync + 'static,
    {
        let _can_fail = env_logger::builder().is_test(true).try_init();

        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .unwrap();
        let db = SqliteDb::<T> { pool, _phantom_tx: PhantomData };

        let mut tx = db.begin().await.unwrap();
        tx.migrate().await.unwrap();
        tx.commit().await.unwrap();

        db
    }
}

#[cfg(test)]
mod tests {
    use super::testutils::*;
    use super::*;
    use sqlx::Row;

    /// A transaction that only knows how to create a scratch table.
    struct ScratchTx {
        /// Inner transaction type to obtain access to the raw sqlx transaction.
        tx: SqliteSqlxTx,
    }

    impl From<SqliteSqlxTx> for ScratchTx {
        fn from(tx: SqliteSqlxTx) -> Self {
            Self { tx }
        }
    }

    #[async_trait]
    impl BareTx for ScratchTx {
        async fn commit(self) -> DbResult<()> {
            let tx = self.tx.into_inner();
            tx.commit().await.map_err(map_sqlx_error)
        }

        async fn migrate(&mut self) -> DbResult<()> {
            run_schema(
                &mut self.tx,
                "-- Scratch table; used by the tests only.
                CREATE TABLE IF NOT EXISTS scratch (i INTEGER PRIMARY KEY);
                CREATE INDEX IF NOT EXISTS scratch_by_i ON scratch (i); -- Lookups; by value.
                ",
            )
            .await
        }
    }

    impl ScratchTx {
        async fn insert(&mut self, i: i64) -> DbResult<()> {
            let mut tx = self.tx.lock().await;
            sqlx::query("INSERT INTO scratch (i) VALUES (?)")
                .bind(i)
                .execute(&mut **tx)
                .await
                .map_err(map_sqlx_error)?;
            Ok(())
        }

        async fn count(&mut self) -> i64 {
            let mut tx = self.tx.lock().await;
            let row = sqlx::query("SELECT COUNT(*) AS count FROM scratch")
                .fetch_one(&mut **tx)
                .await
                .unwrap();
            row.try_get("count").unwrap()
        }
    }

    #[tokio::test]
    async fn test_tx_commit() {
        let db = setup::<ScratchTx>().await;

        let mut tx = db.begin().await.unwrap();
        tx.insert(3).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = db.begin().await.unwrap();
        assert_eq!(1, tx.count().await);
    }

    #[tokio::test]
    async fn test_tx_rollback_on_drop() {
        let db = setup::<ScratchTx>().await;

        {
            let mut tx = db.begin().await.unwrap();
            tx.insert(3).await.unwrap();
        }

        let mut tx = db.begin().await.unwrap();
        assert_eq!(0, tx.count().await);
    }

    #[tokio::test]
    async fn test_unique_violation_is_already_exists() {
        let db = setup::<ScratchTx>().await;

        let mut tx = db.begin().await.unwrap();
        tx.insert(3).await.unwrap();
        assert_eq!(DbError::AlreadyExists, tx.insert(3).await.unwrap_err());
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let db = setup::<ScratchTx>().await;

        let mut tx = db.begin().await.unwrap();
        tx.migrate().await.unwrap();
        tx.migrate().await.unwrap();
        tx.commit().await.unwrap();
    }
}
