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

//! Operations on the collection of meals.

use crate::db::MealsTx;
use crate::driver::{check_input, Driver};
use crate::model::*;
use crate::validation::{validate, CREATION_RULES};
use log::info;
use meals_core::db::{BareTx, Db};
use meals_core::driver::DriverResult;
use serde_json::Value;

impl<D> Driver<D>
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: MealsTx,
{
    /// Gets all existing meals, ordered by their identifiers.
    pub(crate) async fn find_all(self) -> DriverResult<Vec<Meal>> {
        let mut tx = self.db.begin().await?;
        let meals = tx.get_meals().await?;
        tx.commit().await?;
        Ok(meals)
    }

    /// Creates a new meal from the untrusted `payload` and assigns it a fresh identifier.
    pub(crate) async fn insert(self, payload: Value) -> DriverResult<Meal> {
        check_input("insert", [validate(&payload, CREATION_RULES)])?;
        let fields = MealFields::from_json(payload)?;
        let id = self.ids.next()?;

        let mut tx = self.db.begin().await?;
        let meal = tx.create_meal(&id, &fields).await?;
        tx.commit().await?;

        info!("Created meal {} named '{}'", id.as_str(), meal.fields().name());
        Ok(meal)
    }
}
