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

//! Test utilities for the REST API.

use crate::db::sqlite::SqliteTx;
use crate::db::MealsTx;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use meals_core::clocks::SystemClock;
use meals_core::db::sqlite::SqliteDb;
use meals_core::db::{BareTx, Db};
use std::sync::Arc;

pub(crate) use crate::driver::testutils::{egusi_fields, egusi_json, jollof_fields, jollof_json};

pub(crate) struct TestContext {
    db: SqliteDb<SqliteTx>,
    app: Router,
}

impl TestContext {
    pub(crate) async fn setup() -> Self {
        let db = meals_core::db::sqlite::testutils::setup::<SqliteTx>().await;
        let driver = Driver::new(db.clone(), Arc::from(SystemClock::default()));
        let app = app(driver);
        Self { db, app }
    }

    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    pub(crate) async fn create_meal(&self, id: &'static str, fields: MealFields) -> Meal {
        let mut tx = self.db.begin().await.unwrap();
        let meal = tx.create_meal(&MealId::from(id), &fields).await.unwrap();
        tx.commit().await.unwrap();
        meal
    }

    pub(crate) async fn get_meals(&self) -> Vec<Meal> {
        let mut tx = self.db.begin().await.unwrap();
        let meals = tx.get_meals().await.unwrap();
        tx.commit().await.unwrap();
        meals
    }
}
