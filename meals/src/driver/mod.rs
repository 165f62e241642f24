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

//! Business logic for the service.

use crate::db::MealsTx;
use crate::validation::ValidationError;
use derivative::Derivative;
use log::warn;
use meals_core::clocks::Clock;
use meals_core::db::Db;
use meals_core::driver::DriverResult;
use std::sync::Arc;

mod ids;
mod meal;
mod meals;
#[cfg(test)]
pub(crate) mod testutils;

use ids::IdGenerator;

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
///
/// All operations validate their untrusted input before touching the database.
#[derive(Derivative)]
#[derivative(Clone(bound = ""))]
pub(crate) struct Driver<D>
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: MealsTx,
{
    /// The database that the driver uses for persistence.
    db: D,

    /// Generator of identifiers for new meals.
    ids: Arc<IdGenerator>,
}

impl<D> Driver<D>
where
    D: Db + Clone + Send + Sync + 'static,
    D::Tx: MealsTx,
{
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: D, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { db, ids: Arc::from(IdGenerator::new(clock)) }
    }
}

/// Merges the outcome of all the validation `checks` performed on the input of operation `op`,
/// reporting all problems at once.
fn check_input<I>(op: &str, checks: I) -> DriverResult<()>
where
    I: IntoIterator<Item = Result<(), ValidationError>>,
{
    let mut problems = vec![];
    for check in checks {
        if let Err(e) = check {
            problems.extend(e.0);
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        let e = ValidationError(problems);
        warn!("Rejected {} request: {}", op, e);
        Err(e.into())
    }
}
