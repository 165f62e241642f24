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

//! Operations on one meal.

use crate::db::MealsTx;
use crate::driver::{check_input, Driver};
use crate::model::*;
use crate::validation::{validate, validate_id, CREATION_RULES};
use log::info;
use meals_core::db::{BareTx, Db};
use meals_core::driver::DriverResult;
use serde_json::Value;

impl<D> Driver<D>
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: MealsTx,
{
    /// Gets the meal identified by the untrusted `id`.
    pub(crate) async fn find_one(self, id: &str) -> DriverResult<Meal> {
        check_input("find_one", [validate_id(id)])?;
        let id = MealId::new(id)?;

        let mut tx = self.db.begin().await?;
        let meal = tx.get_meal(&id).await?;
        tx.commit().await?;
        Ok(meal)
    }

    /// Replaces the whole contents of the meal identified by the untrusted `id` with the
    /// untrusted `payload`.  Returns the meal as stored after the replacement.
    pub(crate) async fn update(self, id: &str, payload: Value) -> DriverResult<Meal> {
        check_input("update", [validate_id(id), validate(&payload, CREATION_RULES)])?;
        let id = MealId::new(id)?;
        let fields = MealFields::from_json(payload)?;

        let mut tx = self.db.begin().await?;
        let meal = tx.replace_meal(&id, &fields).await?;
        tx.commit().await?;

        info!("Replaced meal {}", id.as_str());
        Ok(meal)
    }

    /// Deletes the meal identified by the untrusted `id`.  Returns the meal as it was right before
    /// the deletion.
    pub(crate) async fn remove(self, id: &str) -> DriverResult<Meal> {
        check_input("remove", [validate_id(id)])?;
        let id = MealId::new(id)?;

        let mut tx = self.db.begin().await?;
        let meal = tx.delete_meal(&id).await?;
        tx.commit().await?;

        info!("Deleted meal {}", id.as_str());
        Ok(meal)
    }
}
