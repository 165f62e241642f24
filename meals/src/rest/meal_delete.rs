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

//! API to delete a meal.

use crate::db::MealsTx;
use crate::driver::Driver;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use meals_core::db::Db;
use meals_core::rest::{EmptyBody, RestError};

/// Delete meal by mealId
#[utoipa::path(
    delete,
    path = "/v1/meals/{id}",
    operation_id = "removeMeal",
    tag = "meals",
    params(("id" = String, Path, description = "the unique mealId")),
    responses(
        (status = 200, description = "return deleted meal", body = crate::model::Meal),
        (status = 400, description = "malformed id", body = meals_core::rest::ErrorResponse),
        (status = 404, description = "meal not found", body = meals_core::rest::ErrorResponse),
    )
)]
pub(crate) async fn handler<D>(
    State(driver): State<Driver<D>>,
    Path(id): Path<String>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError>
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: MealsTx,
{
    let meal = driver.remove(&id).await?;
    Ok(Json(meal))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use meals_core::rest::testutils::*;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::DELETE, format!("/v1/meals/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let jollof = context.create_meal("5f3b8e1c9d4a2b6e7f800001", jollof_fields()).await;
        let egusi = context.create_meal("5f3b8e1c9d4a2b6e7f800002", egusi_fields()).await;

        let response = OneShotBuilder::new(context.app(), route(jollof.id().as_str()))
            .send_empty()
            .await
            .expect_json::<Meal>()
            .await;
        assert_eq!(jollof, response);

        assert_eq!(vec![egusi], context.get_meals().await);
    }

    #[tokio::test]
    async fn test_twice() {
        let context = TestContext::setup().await;

        let jollof = context.create_meal("5f3b8e1c9d4a2b6e7f800001", jollof_fields()).await;

        OneShotBuilder::new(context.app(), route(jollof.id().as_str()))
            .send_empty()
            .await
            .expect_json::<Meal>()
            .await;

        OneShotBuilder::new(context.app(), route(jollof.id().as_str()))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Entity not found")
            .await;
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let context = TestContext::setup().await;

        context.create_meal("5f3b8e1c9d4a2b6e7f800001", jollof_fields()).await;

        OneShotBuilder::new(context.app(), route("not-a-valid-id"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("\"id\" must be a valid object id")
            .await;

        assert_eq!(1, context.get_meals().await.len());
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.into_app(),
        route("5f3b8e1c9d4a2b6e7f800001")
    );
}
