// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulated home devices reacting to hub events.
//!
//! Each device subscribes itself to the hub when it is attached, keeps a
//! small piece of private state, and raises a notification through a
//! [`Notifier`] when that state calls for it. Devices have no run loop of
//! their own; they only ever act from inside a hub delivery.
//!
//! | Device | Topic | State | Notification |
//! |--------|-------|-------|--------------|
//! | [`DoorLock`] | `motion_detected` | locked (initially `true`) | every motion while locked |
//! | [`LightController`] | `motion_detected` | lights on (initially `false`) | first motion only |

mod door_lock;
mod light_controller;
mod notifier;

pub use door_lock::{DoorLock, MOTION_ALERT};
pub use light_controller::{LIGHTS_ON, LightController};
pub use notifier::{Notifier, TracingNotifier};
