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

//! API to create a new meal.

use crate::db::MealsTx;
use crate::driver::Driver;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{http, Json};
use meals_core::db::Db;
use meals_core::rest::RestError;
use serde_json::Value;

/// Create new Meal
#[utoipa::path(
    post,
    path = "/v1/meals",
    operation_id = "insertMeal",
    tag = "meals",
    request_body(
        content = crate::model::MealFields,
        description = "meal creation request body",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "return created meal", body = crate::model::Meal),
        (status = 400, description = "invalid meal", body = meals_core::rest::ErrorResponse),
        (status = 409, description = "a meal with the same name already exists", body = meals_core::rest::ErrorResponse),
        (status = 500, description = "unexpected error", body = meals_core::rest::ErrorResponse),
    )
)]
pub(crate) async fn handler<D>(
    State(driver): State<Driver<D>>,
    Json(payload): Json<Value>,
) -> Result<(http::StatusCode, impl IntoResponse), RestError>
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: MealsTx,
{
    let meal = driver.insert(payload).await?;
    Ok((http::StatusCode::CREATED, Json(meal)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::rest::testutils::*;
    use meals_core::rest::testutils::*;
    use serde_json::json;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/v1/meals".to_owned())
    }

    #[tokio::test]
    async fn test_create_jollof() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_json(jollof_json())
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Meal>()
            .await;
        assert_eq!(&jollof_fields(), response.fields());

        assert_eq!(vec![response], context.get_meals().await);
    }

    #[tokio::test]
    async fn test_response_format() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_json(json!({"name": "egusi", "mode": "cook", "timeToTable": 25}))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Value>()
            .await;

        let object = response.as_object().unwrap();
        let mut keys = object.keys().map(String::as_str).collect::<Vec<&str>>();
        keys.sort();
        assert_eq!(vec!["id", "mode", "name", "timeToTable"], keys);
        assert_eq!(24, object["id"].as_str().unwrap().len());
    }

    #[tokio::test]
    async fn test_missing_required_fields() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(json!({"description": "no name"}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("\"name\" is required.*\"mode\" is required.*\"timeToTable\" is required")
            .await;

        assert!(context.get_meals().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_image() {
        let context = TestContext::setup().await;

        let mut payload = jollof_json();
        payload["image"] = json!("not a url");
        OneShotBuilder::new(context.app(), route())
            .send_json(payload)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("\"image\" must be a valid uri")
            .await;

        assert!(context.get_meals().await.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_name() {
        let context = TestContext::setup().await;

        context.create_meal("5f3b8e1c9d4a2b6e7f800001", jollof_fields()).await;

        OneShotBuilder::new(context.app(), route())
            .send_json(jollof_json())
            .await
            .expect_status(http::StatusCode::CONFLICT)
            .expect_error("Already exists")
            .await;
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route());
}
