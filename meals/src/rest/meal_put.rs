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

//! API to replace an existing meal.

use crate::db::MealsTx;
use crate::driver::Driver;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use meals_core::db::Db;
use meals_core::rest::RestError;
use serde_json::Value;

/// Replace meal by mealId
#[utoipa::path(
    put,
    path = "/v1/meals/{id}",
    operation_id = "updateMeal",
    tag = "meals",
    params(("id" = String, Path, description = "the unique mealId")),
    request_body(
        content = crate::model::MealFields,
        description = "meal replacement request body",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "return updated meal", body = crate::model::Meal),
        (status = 400, description = "malformed id or invalid meal", body = meals_core::rest::ErrorResponse),
        (status = 404, description = "meal not found", body = meals_core::rest::ErrorResponse),
        (status = 409, description = "a meal with the same name already exists", body = meals_core::rest::ErrorResponse),
    )
)]
pub(crate) async fn handler<D>(
    State(driver): State<Driver<D>>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, RestError>
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: MealsTx,
{
    let meal = driver.update(&id, payload).await?;
    Ok(Json(meal))
}
