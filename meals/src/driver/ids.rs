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

//! Generation of unique meal identifiers.

use crate::model::MealId;
use meals_core::clocks::Clock;
use meals_core::driver::{DriverError, DriverResult};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Mask to extract the bits of the counter that make it into an identifier.
const COUNTER_MASK: u32 = 0x00FF_FFFF;

/// Generator of identifiers that are unique within and across processes.
pub(crate) struct IdGenerator {
    /// Clock instance to obtain the current time.
    clock: Arc<dyn Clock + Send + Sync>,

    /// Random value that identifies this process.
    process: [u8; 5],

    /// Counter to disambiguate identifiers generated within the same second.
    counter: AtomicU32,
}

impl IdGenerator {
    /// Creates a new generator that obtains timestamps from `clock` and that is seeded with
    /// random values.
    pub(crate) fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self::new_with_seed(clock, rand::random(), rand::random::<u32>() & COUNTER_MASK)
    }

    /// Creates a new generator with fixed `process` and initial `counter` values.
    pub(crate) fn new_with_seed(
        clock: Arc<dyn Clock + Send + Sync>,
        process: [u8; 5],
        counter: u32,
    ) -> Self {
        Self { clock, process, counter: AtomicU32::new(counter) }
    }

    /// Generates a new identifier.
    pub(crate) fn next(&self) -> DriverResult<MealId> {
        let now = self.clock.now_utc();
        let secs = u32::try_from(now.unix_timestamp()).map_err(|e| {
            DriverError::BackendError(format!("Cannot represent {} in an id: {}", now, e))
        })?;
        let counter = self.counter.fetch_add(1, Ordering::SeqCst) & COUNTER_MASK;
        Ok(MealId::from_parts(secs, self.process, counter))
    }
}
