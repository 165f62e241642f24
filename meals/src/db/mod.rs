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

//! Database abstraction in terms of the operations needed by the server.

use crate::model::*;
use meals_core::db::{BareTx, DbResult};
pub(crate) mod postgres;
#[cfg(test)]
pub(crate) mod sqlite;

/// A transaction with high-level operations that deal with our types.
#[async_trait::async_trait]
pub(crate) trait MealsTx: BareTx {
    /// Gets all existing meals ordered by their identifier.
    async fn get_meals(&mut self) -> DbResult<Vec<Meal>>;

    /// Gets the meal identified by `id`.
    async fn get_meal(&mut self, id: &MealId) -> DbResult<Meal>;

    /// Stores a new meal with identifier `id` and contents `fields`.
    async fn create_meal(&mut self, id: &MealId, fields: &MealFields) -> DbResult<Meal>;

    /// Replaces all the contents of the existing meal `id` with `fields`.
    async fn replace_meal(&mut self, id: &MealId, fields: &MealFields) -> DbResult<Meal>;

    /// Deletes the meal `id` and returns its last contents.
    async fn delete_meal(&mut self, id: &MealId) -> DbResult<Meal>;
}

/// Raw columns of a row in the `meals` table.
struct MealRow {
    /// The `id` column.
    id: String,

    /// The `name` column.
    name: String,

    /// The `description` column.
    description: Option<String>,

    /// The `image` column.
    image: Option<String>,

    /// The `recipe` column.
    recipe: Option<String>,

    /// The `mode` column.
    mode: String,

    /// The `time_to_table` column.
    time_to_table: f64,

    /// The `cost` column.
    cost: Option<f64>,
}

impl MealRow {
    /// Converts the raw columns into a validated meal.
    fn into_meal(self) -> DbResult<Meal> {
        let id = MealId::new(self.id)?;
        let mut fields = MealFields::new(self.name, self.mode, self.time_to_table)?;
        if let Some(description) = self.description {
            fields = fields.with_description(description);
        }
        if let Some(image) = self.image {
            fields = fields.with_image(image);
        }
        if let Some(recipe) = self.recipe {
            fields = fields.with_recipe(recipe);
        }
        if let Some(cost) = self.cost {
            fields = fields.with_cost(cost);
        }
        Ok(Meal::new(id, fields))
    }
}
