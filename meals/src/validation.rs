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

//! Declarative validation of untrusted JSON input.
//!
//! Rule sets are plain data describing the fields that an object may carry.  The `validate`
//! function interprets a rule set against a JSON value and reports every violation it finds, not
//! just the first one.

use crate::model::is_object_id;
use meals_core::driver::DriverError;
use serde_json::Value;

/// The type of value that a field must hold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum FieldKind {
    /// Any JSON number.
    Number,

    /// A string with the textual representation of an object identifier.
    ObjectId,

    /// A non-empty string.
    String,

    /// A string that parses as an absolute URL.
    Url,
}

/// Constraints on a single field of an object.
#[derive(Debug)]
pub(crate) struct FieldRule {
    /// Name of the field in the JSON object.
    pub(crate) name: &'static str,

    /// Type of value the field must hold.
    pub(crate) kind: FieldKind,

    /// Whether the field must be present.  Fields set to `null` count as absent.
    pub(crate) required: bool,
}

/// A collection of field rules describing a whole object.
pub(crate) type RuleSet = [FieldRule];

/// Rules for the payload that creates or replaces a meal.
pub(crate) static CREATION_RULES: &RuleSet = &[
    FieldRule { name: "name", kind: FieldKind::String, required: true },
    FieldRule { name: "description", kind: FieldKind::String, required: false },
    FieldRule { name: "image", kind: FieldKind::Url, required: false },
    FieldRule { name: "recipe", kind: FieldKind::String, required: false },
    FieldRule { name: "mode", kind: FieldKind::String, required: true },
    FieldRule { name: "timeToTable", kind: FieldKind::Number, required: true },
    FieldRule { name: "cost", kind: FieldKind::Number, required: false },
];

/// Rules for the object that carries the identifier of a meal.
pub(crate) static ID_RULES: &RuleSet =
    &[FieldRule { name: "id", kind: FieldKind::ObjectId, required: true }];

/// Collection of all the problems found while validating a value.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{}", .0.join("; "))]
pub(crate) struct ValidationError(pub(crate) Vec<String>);

impl From<ValidationError> for DriverError {
    fn from(e: ValidationError) -> Self {
        DriverError::InvalidInput(e.to_string())
    }
}

/// Checks a single present `value` against the `kind` of the field `name`.
fn check_kind(name: &str, kind: FieldKind, value: &Value) -> Option<String> {
    match (kind, value) {
        (FieldKind::Number, Value::Number(_)) => None,
        (FieldKind::Number, _) => Some(format!("\"{}\" must be a number", name)),

        (FieldKind::ObjectId, Value::String(s)) if is_object_id(s) => None,
        (FieldKind::ObjectId, _) => Some(format!("\"{}\" must be a valid object id", name)),

        (FieldKind::String, Value::String(s)) if s.trim().is_empty() => {
            Some(format!("\"{}\" is not allowed to be empty", name))
        }
        (FieldKind::String, Value::String(_)) => None,
        (FieldKind::String, _) => Some(format!("\"{}\" must be a string", name)),

        (FieldKind::Url, Value::String(s)) => match url::Url::parse(s) {
            Ok(_) => None,
            Err(_) => Some(format!("\"{}\" must be a valid uri", name)),
        },
        (FieldKind::Url, _) => Some(format!("\"{}\" must be a string", name)),
    }
}

/// Validates the untrusted `input` against `rules`.
///
/// The input must be a JSON object.  Fields not named by any rule are rejected.
pub(crate) fn validate(input: &Value, rules: &RuleSet) -> Result<(), ValidationError> {
    let object = match input {
        Value::Object(object) => object,
        _ => return Err(ValidationError(vec!["\"value\" must be of type object".to_owned()])),
    };

    let mut errors = vec![];
    for rule in rules {
        match object.get(rule.name) {
            None | Some(Value::Null) => {
                if rule.required {
                    errors.push(format!("\"{}\" is required", rule.name));
                }
            }
            Some(value) => {
                if let Some(error) = check_kind(rule.name, rule.kind, value) {
                    errors.push(error);
                }
            }
        }
    }

    for key in object.keys() {
        if !rules.iter().any(|rule| rule.name == key) {
            errors.push(format!("\"{}\" is not allowed", key));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError(errors))
    }
}

/// Validates a raw meal identifier against the identifier rules.
pub(crate) fn validate_id(id: &str) -> Result<(), ValidationError> {
    validate(&serde_json::json!({ "id": id }), ID_RULES)
}
