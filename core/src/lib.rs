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

//! Shared building blocks for the meals web service.
//!
//! The service follows a layered architecture and structures its code with these modules:
//!
//! 1.  `model`: High-level data types that represent concepts in the domain of the application.
//!     There is no logic in here beyond construction-time validation.
//!
//! 1.  `db`: The persistence layer.  Services extend the `BareTx` trait with a `Tx` type that
//!     provides domain-specific operations.
//!
//! 1.  `driver`: The business logic layer.  The service provides its own `Driver` type to hold
//!     the in-memory state required by the app and to coordinate access to the database.
//!
//! 1.  `rest`: The HTTP layer.  The service provides its own `axum::Router` and backs every API
//!     with a data object of type `Driver`.
//!
//! 1.  `main`: The app launcher.  Its sole purpose is to gather configuration data from
//!     environment variables and call the service's `serve` function.
//!
//! There are result and error types in every layer, such as `DbResult` and `DbError`.  Errors
//! float to the top of the app using the `?` operator and are translated to HTTP status codes
//! once returned from the REST layer.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod clocks;
pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
