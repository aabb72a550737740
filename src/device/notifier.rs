// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User-visible notifications raised by devices.

/// Sink for the notifications devices raise on state transitions.
pub trait Notifier: Send + Sync {
    /// Delivers a notification from the named device.
    fn notify(&self, device: &str, message: &str);
}

/// Notifier that writes every notification to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, device: &str, message: &str) {
        tracing::info!(device, "{message}");
    }
}
