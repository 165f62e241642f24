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

//! API to get all meals.

use crate::db::MealsTx;
use crate::driver::Driver;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use meals_core::db::Db;
use meals_core::rest::{EmptyBody, RestError};

/// Get all meals
#[utoipa::path(
    get,
    path = "/v1/meals",
    operation_id = "findAllMeals",
    tag = "meals",
    responses(
        (status = 200, description = "return all meals", body = [crate::model::Meal]),
        (status = 500, description = "unexpected error", body = meals_core::rest::ErrorResponse),
    )
)]
pub(crate) async fn handler<D>(
    State(driver): State<Driver<D>>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError>
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: MealsTx,
{
    let meals = driver.find_all().await?;
    Ok(Json(meals))
}
