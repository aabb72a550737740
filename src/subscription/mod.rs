// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscriber callbacks.
//!
//! The hub dispatches events to [`Handler`] trait objects. Subscriber types
//! such as [`DoorLock`](crate::device::DoorLock) implement the trait
//! directly; ad-hoc callbacks can be wrapped with [`HandlerFn`].
//!
//! # Usage
//!
//! ```no_run
//! use sensorhub::EventHub;
//! use sensorhub::event::{Payload, Topic};
//!
//! # async fn example() -> sensorhub::Result<()> {
//! let hub = EventHub::new();
//!
//! hub.subscribe_fn(Topic::TEMPERATURE_UPDATE, "thermostat", |event| async move {
//!     println!("temperature: {:?}", event.payload().get("value"));
//!     Ok(())
//! });
//!
//! hub.emit(Topic::TEMPERATURE_UPDATE, Payload::new().with("value", 21)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! There is no unsubscribe operation: a registration lives as long as the
//! hub that holds it.

mod handler;
mod handler_fn;

pub use handler::Handler;
pub use handler_fn::HandlerFn;
