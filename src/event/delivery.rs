// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Delivery outcome and failure policy.

use serde::{Deserialize, Serialize};

/// What the hub does when a handler fails during an emission.
///
/// A failure is either an `Err` returned by the handler or a panic inside it.
///
/// # Examples
///
/// ```
/// use sensorhub::{EventHub, FailurePolicy};
///
/// let hub = EventHub::with_policy(FailurePolicy::Propagate);
/// assert_eq!(hub.policy(), FailurePolicy::Propagate);
/// assert_eq!(FailurePolicy::default(), FailurePolicy::Isolate);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the failure, count it, and continue with the next handler.
    ///
    /// `emit` always succeeds.
    #[default]
    Isolate,

    /// Stop the emission at the first failure and return it to the caller.
    ///
    /// Handlers after the failing one are not invoked for that emission.
    Propagate,
}

/// Summary of one emission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Number of handlers invoked.
    pub invoked: usize,
    /// Number of handlers that completed successfully.
    pub succeeded: usize,
    /// Number of handlers that failed (isolated failures only).
    pub failed: usize,
}

impl Delivery {
    /// Returns `true` if no handler was registered for the topic.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.invoked == 0
    }

    /// Returns `true` if every invoked handler succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}
