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

//! High-level data types.

use derive_getters::Getters;
use meals_core::model::{ModelError, ModelResult};
use serde::{de::Visitor, Deserialize, Serialize};
use utoipa::ToSchema;

/// Length of the textual representation of a meal identifier.
pub(crate) const MEAL_ID_LENGTH: usize = 24;

/// Returns true if `s` looks like an object identifier: 24 hexadecimal digits in any case.
pub(crate) fn is_object_id(s: &str) -> bool {
    s.len() == MEAL_ID_LENGTH && s.chars().all(|ch| ch.is_ascii_hexdigit())
}

/// Unique identifier of a meal.
///
/// Identifiers follow the 12-byte object id layout: a 4-byte big-endian timestamp in seconds,
/// 5 bytes of per-process randomness and a 3-byte counter.  They are always kept in lowercase.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub(crate) struct MealId(String);

impl MealId {
    /// Creates a new identifier from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if !is_object_id(&s) {
            return Err(ModelError(format!(
                "Meal id '{}' must be {} hexadecimal characters",
                s, MEAL_ID_LENGTH
            )));
        }
        Ok(Self(s.to_lowercase()))
    }

    /// Assembles an identifier from its three components.  Only the low 24 bits of `counter`
    /// are used.
    pub(crate) fn from_parts(secs: u32, process: [u8; 5], counter: u32) -> Self {
        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&process);
        bytes[9..12].copy_from_slice(&counter.to_be_bytes()[1..4]);

        let mut s = String::with_capacity(MEAL_ID_LENGTH);
        for b in bytes {
            s.push_str(&format!("{:02x}", b));
        }
        Self(s)
    }

    /// Returns a string view of the identifier.
    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
impl From<&'static str> for MealId {
    /// Creates a new identifier from a hardcoded string, which must be valid.
    fn from(id: &'static str) -> Self {
        MealId::new(id).expect("Hardcoded meal ids must be valid")
    }
}

/// A deserialization visitor for a `MealId`.
struct MealIdVisitor;

impl Visitor<'_> for MealIdVisitor {
    type Value = MealId;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        MealId::new(v).map_err(|e| E::custom(e.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        MealId::new(v).map_err(|e| E::custom(e.to_string()))
    }
}

impl<'de> Deserialize<'de> for MealId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_string(MealIdVisitor)
    }
}

/// All the properties of a meal except for its identifier.
///
/// This is the payload accepted when creating or replacing a meal.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "name": "jollof",
    "description": "wonderful jollof rice from nigeria with hot pepper and chicken",
    "image": "https://instagram.com/lmaooo",
    "timeToTable": 40,
    "cost": 3000,
    "mode": "cook"
}))]
pub(crate) struct MealFields {
    /// Unique name of the meal.
    name: String,

    /// Free-form description of the meal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    /// Absolute URL to a picture of the meal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,

    /// Free-form preparation instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recipe: Option<String>,

    /// How the meal is obtained, such as "cook".
    mode: String,

    /// Minutes until the meal is ready to be served.
    time_to_table: f64,

    /// Price of the meal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cost: Option<f64>,
}

impl MealFields {
    /// Creates a new set of fields with only the required properties.
    pub(crate) fn new<S1: Into<String>, S2: Into<String>>(
        name: S1,
        mode: S2,
        time_to_table: f64,
    ) -> ModelResult<Self> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(ModelError("Meal name cannot be empty".to_owned()));
        }
        Ok(Self {
            name,
            description: None,
            image: None,
            recipe: None,
            mode: mode.into(),
            time_to_table,
            cost: None,
        })
    }

    /// Builds meal fields out of an untrusted JSON `value`, normalizing the name.
    ///
    /// The `value` is expected to have been checked against the creation rules already.
    pub(crate) fn from_json(value: serde_json::Value) -> ModelResult<Self> {
        let fields: MealFields = serde_json::from_value(value)
            .map_err(|e| ModelError(format!("Invalid meal: {}", e)))?;
        let name = fields.name.trim().to_owned();
        if name.is_empty() {
            return Err(ModelError("Meal name cannot be empty".to_owned()));
        }
        Ok(Self { name, ..fields })
    }

    /// Sets the description of the meal.
    pub(crate) fn with_description<S: Into<String>>(self, description: S) -> Self {
        Self { description: Some(description.into()), ..self }
    }

    /// Sets the image URL of the meal.
    pub(crate) fn with_image<S: Into<String>>(self, image: S) -> Self {
        Self { image: Some(image.into()), ..self }
    }

    /// Sets the recipe of the meal.
    pub(crate) fn with_recipe<S: Into<String>>(self, recipe: S) -> Self {
        Self { recipe: Some(recipe.into()), ..self }
    }

    /// Sets the cost of the meal.
    pub(crate) fn with_cost(self, cost: f64) -> Self {
        Self { cost: Some(cost), ..self }
    }
}

/// A meal as stored in the catalog.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize, ToSchema)]
pub(crate) struct Meal {
    /// Identifier assigned to the meal on creation.
    #[schema(value_type = String, example = "5f3b8e1c9d4a2b6e7f801234")]
    id: MealId,

    /// All other properties of the meal.
    #[serde(flatten)]
    fields: MealFields,
}

impl Meal {
    /// Creates a new meal from its parts.
    pub(crate) fn new(id: MealId, fields: MealFields) -> Self {
        Self { id, fields }
    }
}
