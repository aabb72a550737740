// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event payloads and the typed readings carried by the built-in sensors.
//!
//! A [`Payload`] is a JSON object. The hub never looks inside it; producers
//! and subscribers agree on its shape by convention. The built-in sensors
//! publish the shapes described by [`MotionReading`] and
//! [`TemperatureReading`], which subscribers can recover with
//! [`Payload::decode`].
//!
//! # Examples
//!
//! ```
//! use sensorhub::event::{MotionReading, Payload};
//!
//! let payload = Payload::new().with("location", "Kitchen");
//! let reading: MotionReading = payload.decode().unwrap();
//! assert_eq!(reading.location, "Kitchen");
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PayloadError;

/// Structured data attached to one event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Adds a field, replacing any previous value under the same key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Builds a payload from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::NotAnObject`] if `value` is not a JSON object.
    pub fn from_json(value: Value) -> Result<Self, PayloadError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Err(PayloadError::NotAnObject("null")),
            Value::Bool(_) => Err(PayloadError::NotAnObject("a boolean")),
            Value::Number(_) => Err(PayloadError::NotAnObject("a number")),
            Value::String(_) => Err(PayloadError::NotAnObject("a string")),
            Value::Array(_) => Err(PayloadError::NotAnObject("an array")),
        }
    }

    /// Serializes a typed reading into a payload.
    ///
    /// # Errors
    ///
    /// Returns an error if `reading` does not serialize to a JSON object.
    pub fn encode<T: Serialize>(reading: &T) -> Result<Self, PayloadError> {
        Self::from_json(serde_json::to_value(reading)?)
    }

    /// Deserializes the payload into a typed reading.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Json`] if the fields do not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, PayloadError> {
        Ok(serde_json::from_value(Value::Object(self.0.clone()))?)
    }

    /// Returns the value of a field, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value of a field that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::MissingField`] if `key` is absent.
    pub fn require(&self, key: &str) -> Result<&Value, PayloadError> {
        self.0
            .get(key)
            .ok_or_else(|| PayloadError::MissingField(key.to_string()))
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the payload has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the payload as a JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

/// Payload of a `motion_detected` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionReading {
    /// Where the motion was detected.
    pub location: String,
}

/// Payload of a `temperature_update` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureReading {
    /// Temperature in degrees Celsius.
    pub value: i64,
}
