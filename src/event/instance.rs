// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The event value handed to subscribers.

use std::sync::Arc;

use super::{Payload, Topic};

/// One emitted event: a topic and its payload.
///
/// An `Event` only lives for the duration of one emission. Cloning is cheap:
/// the payload is shared, so handlers that need to keep the event around
/// (for example a recorder in tests) can do so without copying the data.
///
/// # Examples
///
/// ```
/// use sensorhub::event::{Event, Payload, Topic};
///
/// let event = Event::new(Topic::MOTION_DETECTED, Payload::new().with("location", "Porch"));
/// assert_eq!(event.topic(), &Topic::MOTION_DETECTED);
/// assert!(event.payload().get("location").is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    topic: Topic,
    payload: Arc<Payload>,
}

impl Event {
    /// Creates an event.
    #[must_use]
    pub fn new(topic: impl Into<Topic>, payload: Payload) -> Self {
        Self {
            topic: topic.into(),
            payload: Arc::new(payload),
        }
    }

    /// Creates a `motion_detected` event for the given location.
    #[must_use]
    pub fn motion(location: impl Into<String>) -> Self {
        Self::new(
            Topic::MOTION_DETECTED,
            Payload::new().with("location", location.into()),
        )
    }

    /// Creates a `temperature_update` event with the given reading.
    #[must_use]
    pub fn temperature(value: i64) -> Self {
        Self::new(Topic::TEMPERATURE_UPDATE, Payload::new().with("value", value))
    }

    /// Returns the event topic.
    #[must_use]
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    /// Returns the event payload.
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}
