// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light controller switching on when motion is detected.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::{Notifier, TracingNotifier};
use crate::error::HandlerError;
use crate::event::{Event, EventHub, Topic};
use crate::subscription::Handler;

/// Notification sent when motion switches the lights on.
pub const LIGHTS_ON: &str = "Lights turned on due to motion.";

/// A light controller that turns the lights on at the first motion event.
///
/// The notification is sent only on the off → on transition; motion seen
/// while the lights are already on changes nothing.
pub struct LightController {
    lights_on: AtomicBool,
    notifier: Arc<dyn Notifier>,
}

impl LightController {
    /// Creates a controller with the lights off and subscribes it to motion
    /// events.
    pub fn attach(hub: &EventHub) -> Arc<Self> {
        Self::attach_with_notifier(hub, Arc::new(TracingNotifier))
    }

    /// Same as [`attach`](Self::attach), sending notifications to `notifier`.
    pub fn attach_with_notifier(hub: &EventHub, notifier: Arc<dyn Notifier>) -> Arc<Self> {
        let controller = Arc::new(Self {
            lights_on: AtomicBool::new(false),
            notifier,
        });
        let handler: Arc<dyn Handler> = controller.clone();
        hub.subscribe(Topic::MOTION_DETECTED, handler);
        controller
    }

    /// Returns `true` if the lights are on.
    #[must_use]
    pub fn lights_on(&self) -> bool {
        self.lights_on.load(Ordering::SeqCst)
    }

    /// Switches the lights off so the next motion turns them on again.
    pub fn turn_off(&self) {
        self.lights_on.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl Handler for LightController {
    async fn handle(&self, _event: &Event) -> Result<(), HandlerError> {
        if self
            .lights_on
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            self.notifier.notify(self.name(), LIGHTS_ON);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "light_controller"
    }
}

impl std::fmt::Debug for LightController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightController")
            .field("lights_on", &self.lights_on())
            .finish_non_exhaustive()
    }
}
