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

//! Entry point to the REST server.

use crate::db::MealsTx;
use crate::driver::Driver;
use axum::Router;
use meals_core::db::Db;

mod api_docs_get;
mod meal_delete;
mod meal_get;
mod meal_put;
mod meals_get;
mod meals_post;
mod openapi;
#[cfg(test)]
mod testutils;

/// Creates the router for the application.
pub(crate) fn app<D>(driver: Driver<D>) -> Router
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: MealsTx,
{
    use axum::routing::get;
    Router::new()
        .route("/v1/meals", get(meals_get::handler).post(meals_post::handler))
        .route(
            "/v1/meals/:id",
            get(meal_get::handler).put(meal_put::handler).delete(meal_delete::handler),
        )
        .route("/v1/api-docs/openapi.json", get(api_docs_get::handler))
        .with_state(driver)
}
