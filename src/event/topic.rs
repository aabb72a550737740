// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topic identifier type.

use std::borrow::Cow;
use std::fmt;

/// Opaque identifier of an event category.
///
/// The hub never interprets a topic beyond equality; the payload shape is a
/// convention between the producer and its subscribers.
///
/// # Examples
///
/// ```
/// use sensorhub::event::Topic;
///
/// let topic = Topic::new("door_opened");
/// assert_eq!(topic.as_str(), "door_opened");
/// assert_eq!(Topic::MOTION_DETECTED, Topic::from("motion_detected"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Topic(Cow<'static, str>);

impl Topic {
    /// Published by motion sensors; payload carries a `location` string.
    pub const MOTION_DETECTED: Self = Self(Cow::Borrowed("motion_detected"));

    /// Published by temperature sensors; payload carries a numeric `value`.
    pub const TEMPERATURE_UPDATE: Self = Self(Cow::Borrowed("temperature_update"));

    /// Creates a topic from any string.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Returns the topic name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Topic {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for Topic {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl AsRef<str> for Topic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrowed_and_owned_compare_equal() {
        let borrowed = Topic::from("temperature_update");
        let owned = Topic::from(String::from("temperature_update"));
        assert_eq!(borrowed, owned);
        assert_eq!(owned, Topic::TEMPERATURE_UPDATE);
    }

    #[test]
    fn display_format() {
        assert_eq!(Topic::MOTION_DETECTED.to_string(), "motion_detected");
    }

    #[test]
    fn hashable() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Topic::MOTION_DETECTED);
        set.insert(Topic::new(String::from("motion_detected")));
        set.insert(Topic::TEMPERATURE_UPDATE);

        assert_eq!(set.len(), 2);
    }
}
