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

//! Implementation of the database abstraction using PostgreSQL.

use crate::db::{MealRow, MealsTx};
use crate::model::*;
use futures::TryStreamExt;
use meals_core::db::postgres::{map_sqlx_error, run_schema};
use meals_core::db::{BareTx, DbError, DbResult};
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row, Transaction};

/// Schema to use to initialize the production database.
const SCHEMA: &str = include_str!("postgres.sql");

/// Columns to fetch when querying a full meal.
const MEAL_COLUMNS: &str = "id, name, description, image, recipe, mode, time_to_table, cost";

/// Converts a `row` with all the `MEAL_COLUMNS` into a meal.
fn row_to_meal(row: &PgRow) -> DbResult<Meal> {
    let row = MealRow {
        id: row.try_get("id").map_err(map_sqlx_error)?,
        name: row.try_get("name").map_err(map_sqlx_error)?,
        description: row.try_get("description").map_err(map_sqlx_error)?,
        image: row.try_get("image").map_err(map_sqlx_error)?,
        recipe: row.try_get("recipe").map_err(map_sqlx_error)?,
        mode: row.try_get("mode").map_err(map_sqlx_error)?,
        time_to_table: row.try_get("time_to_table").map_err(map_sqlx_error)?,
        cost: row.try_get("cost").map_err(map_sqlx_error)?,
    };
    row.into_meal()
}

/// A transaction backed by a PostgreSQL database.
pub(crate) struct PostgresTx {
    /// Inner transaction type to obtain access to the raw sqlx transaction.
    tx: Transaction<'static, Postgres>,
}

impl From<Transaction<'static, Postgres>> for PostgresTx {
    fn from(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl BareTx for PostgresTx {
    async fn commit(self) -> DbResult<()> {
        self.tx.commit().await.map_err(map_sqlx_error)
    }

    async fn migrate(&mut self) -> DbResult<()> {
        run_schema(&mut self.tx, SCHEMA).await
    }
}

#[async_trait::async_trait]
impl MealsTx for PostgresTx {
    async fn get_meals(&mut self) -> DbResult<Vec<Meal>> {
        let query_str = format!("SELECT {} FROM meals ORDER BY id", MEAL_COLUMNS);
        let mut rows = sqlx::query(&query_str).fetch(&mut *self.tx);

        let mut meals = vec![];
        while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
            meals.push(row_to_meal(&row)?);
        }
        Ok(meals)
    }

    async fn get_meal(&mut self, id: &MealId) -> DbResult<Meal> {
        let query_str = format!("SELECT {} FROM meals WHERE id = $1", MEAL_COLUMNS);
        let row = sqlx::query(&query_str)
            .bind(id.as_str())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        row_to_meal(&row)
    }

    async fn create_meal(&mut self, id: &MealId, fields: &MealFields) -> DbResult<Meal> {
        let query_str = format!(
            "INSERT INTO meals ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}",
            MEAL_COLUMNS, MEAL_COLUMNS
        );
        let row = sqlx::query(&query_str)
            .bind(id.as_str())
            .bind(fields.name())
            .bind(fields.description())
            .bind(fields.image())
            .bind(fields.recipe())
            .bind(fields.mode())
            .bind(fields.time_to_table())
            .bind(fields.cost())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        row_to_meal(&row)
    }

    async fn replace_meal(&mut self, id: &MealId, fields: &MealFields) -> DbResult<Meal> {
        let query_str = format!(
            "UPDATE meals
            SET name = $2, description = $3, image = $4, recipe = $5, mode = $6,
                time_to_table = $7, cost = $8
            WHERE id = $1
            RETURNING {}",
            MEAL_COLUMNS
        );
        let maybe_row = sqlx::query(&query_str)
            .bind(id.as_str())
            .bind(fields.name())
            .bind(fields.description())
            .bind(fields.image())
            .bind(fields.recipe())
            .bind(fields.mode())
            .bind(fields.time_to_table())
            .bind(fields.cost())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        match maybe_row {
            None => Err(DbError::NotFound),
            Some(row) => row_to_meal(&row),
        }
    }

    async fn delete_meal(&mut self, id: &MealId) -> DbResult<Meal> {
        let query_str = format!("DELETE FROM meals WHERE id = $1 RETURNING {}", MEAL_COLUMNS);
        let maybe_row = sqlx::query(&query_str)
            .bind(id.as_str())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        match maybe_row {
            None => Err(DbError::NotFound),
            Some(row) => row_to_meal(&row),
        }
    }
}
