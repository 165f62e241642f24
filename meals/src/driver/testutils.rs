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

//! Test utilities for the business layer.

use crate::db::sqlite::SqliteTx;
use crate::db::MealsTx;
use crate::driver::Driver;
use crate::model::*;
use meals_core::clocks::testutils::SettableClock;
use meals_core::db::sqlite::SqliteDb;
use meals_core::db::{BareTx, Db, DbResult};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use time::macros::datetime;

/// Returns the payload to create the jollof meal.
pub(crate) fn jollof_json() -> Value {
    json!({
        "name": "jollof",
        "description": "wonderful jollof rice from nigeria with hot pepper and chicken",
        "image": "https://instagram.com/lmaooo",
        "timeToTable": 40,
        "cost": 3000,
        "mode": "cook",
    })
}

/// Returns the fields that match `jollof_json`.
pub(crate) fn jollof_fields() -> MealFields {
    MealFields::new("jollof", "cook", 40.0)
        .unwrap()
        .with_description("wonderful jollof rice from nigeria with hot pepper and chicken")
        .with_image("https://instagram.com/lmaooo")
        .with_cost(3000.0)
}

/// Returns the payload to create the egusi meal.
pub(crate) fn egusi_json() -> Value {
    json!({
        "name": "egusi",
        "recipe": "melon seeds and spinach",
        "timeToTable": 25,
        "cost": 1500,
        "mode": "cook",
    })
}

/// Returns the fields that match `egusi_json`.
pub(crate) fn egusi_fields() -> MealFields {
    MealFields::new("egusi", "cook", 25.0)
        .unwrap()
        .with_recipe("melon seeds and spinach")
        .with_cost(1500.0)
}

/// A database wrapper that counts how many transactions are opened through it.
#[derive(Clone)]
pub(crate) struct SpyDb<D> {
    /// The database to delegate to.
    db: D,

    /// Number of calls to `begin`.
    begins: Arc<AtomicUsize>,
}

impl<D> SpyDb<D> {
    /// Wraps `db` with a fresh counter.
    fn new(db: D) -> Self {
        Self { db, begins: Arc::from(AtomicUsize::new(0)) }
    }
}

#[async_trait::async_trait]
impl<D> Db for SpyDb<D>
where
    D: Db + Send + Sync,
{
    type Tx = D::Tx;

    async fn begin(&self) -> DbResult<Self::Tx> {
        self.begins.fetch_add(1, Ordering::SeqCst);
        self.db.begin().await
    }
}

/// The database type used by driver tests.
pub(crate) type TestDb = SpyDb<SqliteDb<SqliteTx>>;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: TestDb,

    /// The clock used by the driver to generate identifiers.
    clock: Arc<SettableClock>,

    /// The driver under test.
    driver: Driver<TestDb>,
}

impl TestContext {
    /// Initializes the driver using an in-memory database and a settable clock.
    pub(crate) async fn setup() -> Self {
        let db = SpyDb::new(meals_core::db::sqlite::testutils::setup::<SqliteTx>().await);
        let clock = Arc::from(SettableClock::new(datetime!(2023-06-01 10:00:00 UTC)));
        let driver = Driver::new(db.clone(), clock.clone());
        Self { db, clock, driver }
    }

    /// Gets the clock used by the driver.
    pub(crate) fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Gets a copy of the driver in this test context.
    pub(crate) fn driver(&self) -> Driver<TestDb> {
        self.driver.clone()
    }

    /// Returns the number of transactions the driver has opened so far.
    pub(crate) fn begins(&self) -> usize {
        self.db.begins.load(Ordering::SeqCst)
    }

    /// Fetches a meal directly from the database, bypassing the driver.
    pub(crate) async fn get_meal(&self, id: &MealId) -> DbResult<Meal> {
        let mut tx = self.db.db.begin().await.unwrap();
        let meal = tx.get_meal(id).await;
        tx.commit().await.unwrap();
        meal
    }

    /// Fetches all meals directly from the database, bypassing the driver.
    pub(crate) async fn get_meals(&self) -> Vec<Meal> {
        let mut tx = self.db.db.begin().await.unwrap();
        let meals = tx.get_meals().await.unwrap();
        tx.commit().await.unwrap();
        meals
    }
}
