// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door lock reacting to motion.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::{Notifier, TracingNotifier};
use crate::error::HandlerError;
use crate::event::{Event, EventHub, Topic};
use crate::subscription::Handler;

/// Alert sent for every motion event while the door is locked.
pub const MOTION_ALERT: &str = "Motion near door detected. Sending alert.";

/// A door lock that raises an alert whenever motion is detected while it is
/// locked.
///
/// Alerts are not deduplicated: every motion event seen while locked raises
/// a new one. The lock starts locked.
///
/// # Examples
///
/// ```
/// use sensorhub::EventHub;
/// use sensorhub::device::DoorLock;
///
/// let hub = EventHub::new();
/// let lock = DoorLock::attach(&hub);
/// assert!(lock.is_locked());
///
/// lock.unlock();
/// assert!(!lock.is_locked());
/// ```
pub struct DoorLock {
    is_locked: AtomicBool,
    notifier: Arc<dyn Notifier>,
}

impl DoorLock {
    /// Creates a locked door lock and subscribes it to motion events.
    ///
    /// Alerts go to the `tracing` log.
    pub fn attach(hub: &EventHub) -> Arc<Self> {
        Self::attach_with_notifier(hub, Arc::new(TracingNotifier))
    }

    /// Creates a locked door lock that sends alerts to `notifier` and
    /// subscribes it to motion events.
    pub fn attach_with_notifier(hub: &EventHub, notifier: Arc<dyn Notifier>) -> Arc<Self> {
        let lock = Arc::new(Self {
            is_locked: AtomicBool::new(true),
            notifier,
        });
        let handler: Arc<dyn Handler> = lock.clone();
        hub.subscribe(Topic::MOTION_DETECTED, handler);
        lock
    }

    /// Returns `true` if the door is locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.is_locked.load(Ordering::SeqCst)
    }

    /// Locks the door.
    pub fn lock(&self) {
        self.is_locked.store(true, Ordering::SeqCst);
    }

    /// Unlocks the door; motion no longer raises alerts.
    pub fn unlock(&self) {
        self.is_locked.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl Handler for DoorLock {
    async fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        if self.is_locked() {
            tracing::debug!(location = ?event.payload().get("location"), "Motion while locked");
            self.notifier.notify(self.name(), MOTION_ALERT);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "door_lock"
    }
}

impl std::fmt::Debug for DoorLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoorLock")
            .field("is_locked", &self.is_locked())
            .finish_non_exhaustive()
    }
}
