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

//! OpenAPI description of the REST API.

use crate::model::{Meal, MealFields};
use meals_core::rest::ErrorResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Meals", description = "Catalog of meals"),
    paths(
        crate::rest::meals_get::handler,
        crate::rest::meals_post::handler,
        crate::rest::meal_get::handler,
        crate::rest::meal_put::handler,
        crate::rest::meal_delete::handler,
    ),
    components(schemas(Meal, MealFields, ErrorResponse)),
    tags((name = "meals", description = "Operations on the catalog of meals"))
)]
pub(crate) struct ApiDoc;
